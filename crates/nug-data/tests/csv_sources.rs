use std::fs;

use nug_core::{IsotopeId, NugError, Projectile};
use nug_data::{CsvCatalogSource, CsvMeasurementSource};
use nug_grade::{CatalogSource, MeasurementKey, MeasurementSource};
use tempfile::tempdir;

const TABLE: &str = "\
Projectile,Z,A,Reaction,Energy,dEnergy,Data,dData,EXFOR_Entry,Year,Author,Dataset_Number
n,3,7,\"N,TOT\",1.0e6,,1.45,0.02,10001,1985,Smith,10001002
n,3,7,\"N,TOT\",2.0e6,1.0e4,1.60,,10001,1985,Smith,10001002
n,3,7,\"N,TOT\",3.0e6,,1.70,0.05,20002,,,20002003
p,3,7,\"P,EL\",1.0e6,,0.20,0.01,30003,2001,Jones,30003001
";

#[test]
fn measurement_rows_are_indexed_by_isotope_and_reaction() {
    let source = CsvMeasurementSource::from_reader(TABLE.as_bytes()).expect("table");
    assert_eq!(source.table_count(), 2);

    let key = MeasurementKey::new(Projectile::Neutron, 3, 7, "N,TOT");
    let table = source.measurements(&key).expect("lookup").expect("table");
    assert_eq!(table.len(), 3);
    assert_eq!(table[0].value_uncertainty, Some(0.02));
    assert_eq!(table[0].energy_uncertainty, None);
    assert_eq!(table[1].value_uncertainty, None);
    assert_eq!(table[1].energy_uncertainty, Some(1.0e4));
    assert_eq!(table[2].year, None);
    assert_eq!(table[2].dataset_id, "20002003");
    assert_eq!(table[0].author, "Smith");
}

#[test]
fn absent_keys_are_not_found() {
    let source = CsvMeasurementSource::from_reader(TABLE.as_bytes()).expect("table");
    let key = MeasurementKey::new(Projectile::Neutron, 26, 56, "N,TOT");
    assert!(source.measurements(&key).expect("lookup").is_none());
}

#[test]
fn malformed_rows_are_data_errors() {
    let broken = TABLE.replace("1.45", "abc");
    let err = CsvMeasurementSource::from_reader(broken.as_bytes()).expect_err("bad value");
    assert!(matches!(err, NugError::Data(_)));
    assert!(!err.is_fatal());

    let projectile = TABLE.replace("p,3,7", "x,3,7");
    let err = CsvMeasurementSource::from_reader(projectile.as_bytes()).expect_err("projectile");
    assert_eq!(err.info().code, "measurements-projectile");
}

#[test]
fn measurement_file_is_read_from_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("exfor.csv");
    fs::write(&path, TABLE).expect("write");
    let source = CsvMeasurementSource::from_path(&path).expect("table");
    assert_eq!(source.table_count(), 2);

    let err = CsvMeasurementSource::from_path(dir.path().join("absent.csv")).expect_err("missing");
    assert_eq!(err.info().code, "measurements-open");
}

#[test]
fn catalog_rows_are_returned_as_written() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("isotopes.csv");
    fs::write(&path, "Z,A,Symbol\n0,1,n\n3,7,Li\n1,20,Heavy Water\n").expect("write");
    let catalog = CsvCatalogSource::new(&path);
    let isotopes = catalog.isotopes().expect("catalog");
    assert_eq!(isotopes.len(), 3);
    assert_eq!(isotopes[1], IsotopeId::new(3, 7, "Li"));
    assert_eq!(isotopes[2].symbol, "Heavy Water");
}
