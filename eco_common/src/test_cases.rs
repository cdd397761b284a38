//! Snapshot fixtures shared by the tests of every crate in the workspace.
//!
//! `ORIGINAL_DEF` and `OPTIMIZED_DEF` describe the same small design before
//! and after optimization: `u1` is resized, `u2` and `r[0]` move, and two
//! buffers are inserted where `rebuf1` drives the input of `rebuf2`.

/// Snapshot before optimization.
pub const ORIGINAL_DEF: &str = r#"VERSION 5.8 ;
DIVIDERCHAR "/" ;
BUSBITCHARS "[]" ;
DESIGN top ;
UNITS DISTANCE MICRONS 1000 ;
DIEAREA ( 0 0 ) ( 10000 10000 ) ;
COMPONENTS 4 ;
    - u1 INVx1_ASAP7_75t_L + PLACED ( 100 200 ) N ;
    - u2 NAND2xp5_ASAP7_75t_L + PLACED ( 300 200 ) FS ;
    - u3 NOR2xp33_ASAP7_75t_L
      + PLACED ( 500 -40 ) N ;
    - r\[0\] DFFHQNx1_ASAP7_75t_L + PLACED ( 700 200 ) N ;
END COMPONENTS
PINS 1 ;
    - in1 + NET in1 + DIRECTION INPUT + USE SIGNAL ;
END PINS
SPECIALNETS 1 ;
    - VDD ( * VDD ) + USE POWER ;
END SPECIALNETS
NETS 3 ;
    - in1 ( PIN in1 ) ( u1 A ) + USE SIGNAL ;
    - n1 ( u1 Y ) ( u2 A ) ( u3 B ) + USE SIGNAL ;
    - n2 ( u2 Y ) ( r\[0\] D ) + USE SIGNAL ;
END NETS
END DESIGN
"#;

/// Snapshot after optimization.
pub const OPTIMIZED_DEF: &str = r#"VERSION 5.8 ;
DIVIDERCHAR "/" ;
BUSBITCHARS "[]" ;
DESIGN top ;
UNITS DISTANCE MICRONS 1000 ;
DIEAREA ( 0 0 ) ( 10000 10000 ) ;
COMPONENTS 6 ;
    - u1 INVx2_ASAP7_75t_L + PLACED ( 100 200 ) N ;
    - u2 NAND2xp5_ASAP7_75t_L + PLACED ( 320 200 ) FS ;
    - u3 NOR2xp33_ASAP7_75t_L
      + PLACED ( 500 -40 ) N ;
    - r\[0\] DFFHQNx1_ASAP7_75t_L + PLACED ( 700 260 ) N ;
    - rebuf1 BUFx2_ASAP7_75t_L + PLACED ( 200 200 ) N ;
    - rebuf2 BUFx2_ASAP7_75t_L + PLACED ( 400 100 ) N ;
END COMPONENTS
PINS 1 ;
    - in1 + NET in1 + DIRECTION INPUT + USE SIGNAL ;
END PINS
SPECIALNETS 1 ;
    - VDD ( * VDD ) ( rebuf1 VDD ) + USE POWER ;
END SPECIALNETS
NETS 5 ;
    - in1 ( PIN in1 ) ( u1 A ) + USE SIGNAL ;
    - n1 ( u1 Y ) ( rebuf1 A ) + USE SIGNAL ;
    - net_rebuf1 ( rebuf1 Y ) ( u2 A ) ( rebuf2 A ) + USE SIGNAL ;
    - net_rebuf2 ( rebuf2 Y ) ( u3 B ) + USE SIGNAL ;
    - n2 ( u2 Y ) ( r\[0\] D ) + USE SIGNAL ;
END NETS
END DESIGN
"#;

/// The changelist that turns [`ORIGINAL_DEF`] into [`OPTIMIZED_DEF`].
pub const EXPECTED_CHANGELIST: &str = "size_cell u1 INVx2_ASAP7_75t_L
insert_buffer {u3/B} BUFx2_ASAP7_75t_L rebuf2 net_rebuf2
insert_buffer {u2/A rebuf2/A} BUFx2_ASAP7_75t_L rebuf1 net_rebuf1
";

/// Gate-level netlist matching [`ORIGINAL_DEF`].
pub const ORIGINAL_NETLIST: &str = r#"module top (in1, out1);
  input in1;
  output out1;
  wire n1;
  wire n2;

  INVx1_ASAP7_75t_L u1 (.A(in1), .Y(n1));
  NAND2xp5_ASAP7_75t_L u2 (.A(n1), .B(n1), .Y(n2));
  NOR2xp33_ASAP7_75t_L u3 (.A(n1), .B(n1), .Y(out1));
  DFFHQNx1_ASAP7_75t_L \r[0]  (.D(n2), .CLK(in1));
  TAPCELL_ASAP7_75t_L tap0 ();
endmodule
"#;

/// Build a component-only snapshot from `(name, cell type)` pairs.
pub fn components_def(components: &[(&str, &str)]) -> String {
    let mut text = format!("DESIGN generated ;\nCOMPONENTS {} ;\n", components.len());
    for (name, cell_type) in components {
        text.push_str(&format!("    - {name} {cell_type} + PLACED ( 0 0 ) N ;\n"));
    }
    text.push_str("END COMPONENTS\nEND DESIGN\n");
    text
}

/// Build a snapshot with a component table and a net section.
///
/// Each net is `(name, [(instance, pin), ...])`.
pub fn design_def(components: &[(&str, &str)], nets: &[(&str, &[(&str, &str)])]) -> String {
    let mut text = components_def(components);
    text.truncate(text.len() - "END DESIGN\n".len());
    text.push_str(&format!("NETS {} ;\n", nets.len()));
    for (name, pins) in nets {
        text.push_str(&format!("    - {name}"));
        for (instance, pin) in pins.iter() {
            text.push_str(&format!(" ( {instance} {pin} )"));
        }
        text.push_str(" + USE SIGNAL ;\n");
    }
    text.push_str("END NETS\nEND DESIGN\n");
    text
}
