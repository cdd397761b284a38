#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use eco_common::Diagnostics;
use eco_common::test_cases::{OPTIMIZED_DEF, ORIGINAL_DEF, ORIGINAL_NETLIST, components_def};
use eco_transform::{
    Corner, DisplacementReport, RenameStats, TransformError, rename, rename_components,
    rename_components_file, rename_netlist, rename_netlist_file, strip_backslashes_file,
};
use quickcheck::quickcheck;
use rstest::rstest;

mod common;

fn write_temp(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_fixture_displacement() {
    common::init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let original = write_temp(&dir, "original.def", ORIGINAL_DEF);
    let optimized = write_temp(&dir, "optimized.def", OPTIMIZED_DEF);

    let mut diagnostics = Diagnostics::new();
    let report = DisplacementReport::from_paths(&original, &optimized, &mut diagnostics).unwrap();

    assert_eq!(report.original_placed, 4);
    assert_eq!(report.optimized_placed, 6);
    assert_eq!(report.cells_analyzed, 4);
    assert_eq!(report.total_displacement, 80);
    assert_eq!(report.cells_moved, 2);
    assert_eq!(report.new_cells, 2);
    assert!(diagnostics.is_empty());

    let text = report.to_string();
    assert!(text.contains("- Average displacement per cell: 20.000000"));
    assert!(text.contains("- Cells moved: 2 out of 4 (50.00%)"));
    assert!(text.ends_with("- New cells in optimized design (ignored): 2"));
}

#[test]
fn test_displacement_json() {
    let dir = tempfile::tempdir().unwrap();
    let original = write_temp(&dir, "original.def", ORIGINAL_DEF);
    let optimized = write_temp(&dir, "optimized.def", OPTIMIZED_DEF);

    let report =
        DisplacementReport::from_paths(&original, &optimized, &mut Diagnostics::new()).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["total_displacement"], 80);
    assert_eq!(value["moved_percentage"], 50.0);
}

#[test]
fn test_displacement_missing_cell() {
    let dir = tempfile::tempdir().unwrap();
    let original = write_temp(&dir, "original.def", ORIGINAL_DEF);
    let optimized = write_temp(
        &dir,
        "optimized.def",
        &components_def(&[("u1", "INVx1"), ("u2", "INVx1")]),
    );

    let err = DisplacementReport::from_paths(&original, &optimized, &mut Diagnostics::new())
        .unwrap_err();
    match err {
        TransformError::MissingPlacements { names } => assert_eq!(names, vec!["u3", "r[0]"]),
        other => panic!("expected missing placements, got {other:?}"),
    }
}

#[test]
fn test_rename_fixture_components() {
    let mut out = Vec::new();
    let stats = rename_components(ORIGINAL_DEF.as_bytes(), &mut out, Corner::SL).unwrap();

    assert_eq!(stats, RenameStats { processed: 4, changed: 4 });
    assert_eq!(
        String::from_utf8(out).unwrap(),
        ORIGINAL_DEF.replace("_75t_L", "_75t_SL")
    );
}

#[test]
fn test_rename_counts_with_negative_coordinates() {
    let text = "COMPONENTS 2 ;\n- a BUF_L + PLACED ( -5 -7 ) N ;\n- b BUF_L\n  + PLACED ( 10 -20 ) N ;\nEND COMPONENTS\n";
    let mut out = Vec::new();
    let stats = rename_components(text.as_bytes(), &mut out, Corner::SL).unwrap();

    assert_eq!(stats, RenameStats { processed: 2, changed: 2 });
    assert_eq!(String::from_utf8(out).unwrap(), text.replace("BUF_L", "BUF_SL"));
}

#[test]
fn test_rename_components_leaves_other_sections() {
    let text = "NETS 1 ;\n- BUF_L ( a Y ) ;\nEND NETS\nCOMPONENTS 1 ;\n- b BUF_L ;\nEND COMPONENTS\n";
    let mut out = Vec::new();
    rename_components(text.as_bytes(), &mut out, Corner::R).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "NETS 1 ;\n- BUF_L ( a Y ) ;\nEND NETS\nCOMPONENTS 1 ;\n- b BUF_R ;\nEND COMPONENTS\n"
    );
}

#[test]
fn test_rename_fixture_netlist() {
    let mut out = Vec::new();
    let stats = rename_netlist(ORIGINAL_NETLIST.as_bytes(), &mut out, Corner::SL).unwrap();

    let expected = ORIGINAL_NETLIST
        .replace("_75t_L", "_75t_SL")
        .replace("TAPCELL_ASAP7_75t_SL", "TAPCELL_ASAP7_75t_L");
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(stats.changed, 4);
}

#[rstest]
#[case::plain("  BUFx3_ASAP7_75t_L rebuffer18 (.A(net395),", "  BUFx3_ASAP7_75t_R rebuffer18 (.A(net395),")]
#[case::no_space("INVx1_ASAP7_75t_SL u1(.A(a));", "INVx1_ASAP7_75t_R u1(.A(a));")]
#[case::escaped("DFF_ASAP7_75t_L \\r[0]  (.D(n2));", "DFF_ASAP7_75t_R \\r[0]  (.D(n2));")]
#[case::port_list(".A(net395), .Y(net396));", ".A(net395), .Y(net396));")]
#[case::declaration("wire BUF_L;", "wire BUF_L;")]
fn test_rename_netlist_lines(#[case] line: &str, #[case] expected: &str) {
    let mut out = Vec::new();
    rename_netlist(format!("{line}\n").as_bytes(), &mut out, Corner::R).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{expected}\n"));
}

#[test]
fn test_corner_files() {
    let dir = tempfile::tempdir().unwrap();
    let def_in = write_temp(&dir, "in.def", ORIGINAL_DEF);
    let netlist_in = write_temp(&dir, "in.v", ORIGINAL_NETLIST);
    let def_out = dir.path().join("out.def");
    let netlist_out = dir.path().join("out.v");

    let def_stats = rename_components_file(&def_in, &def_out, Corner::SRAM).unwrap();
    let netlist_stats = rename_netlist_file(&netlist_in, &netlist_out, Corner::SRAM).unwrap();

    assert_eq!(def_stats.changed, 4);
    assert_eq!(netlist_stats.changed, 4);
    assert!(
        std::fs::read_to_string(&def_out)
            .unwrap()
            .contains("- u1 INVx1_ASAP7_75t_SRAM + PLACED")
    );
    assert!(
        std::fs::read_to_string(&netlist_out)
            .unwrap()
            .contains("TAPCELL_ASAP7_75t_L tap0 ();")
    );
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = rename_netlist_file(dir.path().join("absent.v"), dir.path().join("out.v"), Corner::L)
        .unwrap_err();
    assert!(matches!(err, TransformError::Record(_)));
}

#[test]
fn test_unescape_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_temp(&dir, "in.def", ORIGINAL_DEF);
    let output = dir.path().join("out.def");

    let removed = strip_backslashes_file(&input, &output).unwrap();
    assert_eq!(removed, 4);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        ORIGINAL_DEF.replace('\\', "")
    );
}

quickcheck! {
    fn prop_rename_is_idempotent(stem: String, corner_index: usize) -> bool {
        let corner = Corner::ALL[corner_index % Corner::ALL.len()];
        let once = rename(&stem, corner);
        rename(&once, corner) == once
    }

    fn prop_rename_keeps_stem(stem: String, corner_index: usize) -> bool {
        let stem = stem.replace('_', "");
        let corner = Corner::ALL[corner_index % Corner::ALL.len()];
        let cell_type = format!("{stem}_L");
        stem.starts_with("TAPCELL") || rename(&cell_type, corner) == format!("{stem}_{corner}")
    }
}
