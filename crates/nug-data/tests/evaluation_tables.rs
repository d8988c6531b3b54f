use std::fs;

use nug_core::{NugError, Projectile};
use nug_data::{parse_evaluation_table, DirectoryEvaluationSource};
use nug_grade::{EvaluationKey, EvaluationSource};
use tempfile::tempdir;

const TABLE: &str = "\
# Li7 n,tot
# evaluation: endf8
# columns
#   E(MeV)      xs(mb)     xslow(mb)  xsupp(mb)
#
  2.0e+00   1600.0   1590.0   1610.0
  1.0e+00   1450.0   1440.0   1460.0
  3.0e+00   1700.0

";

fn key() -> EvaluationKey {
    EvaluationKey {
        evaluation: "endf8".to_string(),
        projectile: Projectile::Neutron,
        reaction_code: 1,
        z: 3,
        a: 7,
    }
}

#[test]
fn tables_are_converted_to_ev_and_barns() {
    let curve = parse_evaluation_table(TABLE).expect("curve");
    assert_eq!(curve.energies(), &[1.0e6, 2.0e6, 3.0e6]);
    assert!((curve.values()[0] - 1.45).abs() < 1e-12);
    assert!((curve.interpolate(1.5e6) - 1.525).abs() < 1e-12);
}

#[test]
fn malformed_lines_are_data_errors() {
    let broken = TABLE.replace("1600.0", "n/a");
    let err = parse_evaluation_table(&broken).expect_err("bad number");
    assert!(matches!(err, NugError::Data(_)));
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("6"));

    let header_only = TABLE.lines().take(5).collect::<Vec<_>>().join("\n");
    assert_eq!(
        parse_evaluation_table(&header_only).expect_err("empty").info().code,
        "evaluation-empty"
    );
}

#[test]
fn directory_source_resolves_file_names() {
    let dir = tempdir().expect("tempdir");
    let source = DirectoryEvaluationSource::new(dir.path());
    let path = source.path_for(&key());
    assert!(path.ends_with("endf8/n-3-7-MT001.txt"));

    assert!(source.evaluation(&key()).expect("lookup").is_none());

    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, TABLE).expect("write");
    let curve = source.evaluation(&key()).expect("lookup").expect("curve");
    assert_eq!(curve.len(), 3);
}
