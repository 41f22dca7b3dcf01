use csv::ReaderBuilder;
use nomenclatura::*;

const NAMES: &str = include_str!("data/nombres.csv");

fn name_smiles(smiles: &str) -> Option<String> {
    let (atoms, bonds) = parse_smiles(smiles).unwrap();
    name(&atoms, &bonds)
}

#[test]
fn test_names_from_table() {
    init_logging("warn");
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(NAMES.as_bytes());
    let mut failures = Vec::new();
    let mut total = 0;
    for record in reader.records() {
        let record = record.unwrap();
        let (smiles, expected) = (&record[0], &record[1]);
        total += 1;
        let actual = name_smiles(smiles);
        if actual.as_deref() != Some(expected) {
            failures.push(format!("{smiles}: expected {expected:?}, got {actual:?}"));
        }
    }
    assert!(total > 0);
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_refusals() {
    // Disconnected, polycyclic, an ester, and a chain past the stem table.
    for smiles in ["C.C", "C1CC2CCC1C2", "CC(=O)OC", "CCCCCCCCCCCCCCCC"] {
        assert_eq!(name_smiles(smiles), None, "{smiles}");
    }
    let (atoms, bonds) = parse_smiles("CCCCCCCCCCCCCCCC").unwrap();
    assert_eq!(try_name(&atoms, &bonds), Err(NamingError::BackboneTooLong(16)));
}

#[test]
fn test_analysis_json() {
    let (atoms, bonds) = parse_smiles("CC(O)CCC").unwrap();
    let analysis = detailed_analysis(&atoms, &bonds);
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["name"], "pentan-2-ol");
    assert_eq!(json["backbone_length"], 5);
    assert_eq!(json["functional_groups"][0]["kind"], "Hydroxyl");
}

#[test]
fn test_explicit_hydrogens_match_implicit() {
    assert_eq!(name_smiles("[CH3][CH2][OH]").as_deref(), Some("etanol"));
    assert_eq!(name_smiles("[CH4]").as_deref(), Some("metano"));
}
