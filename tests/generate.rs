mod common;

use common::TestWorkspace;
use csv_forge::data::Value;
use csv_forge::error::GenerationError;
use csv_forge::generate::{
    generate, generate_with, load_column_definitions, ColumnDefinition, GeneratorType,
    MAX_ROW_COUNT,
};
use csv_forge::provider::WordListProvider;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PEOPLE_SPEC: &str = r#"
- name: id
  type: id
  options:
    prefix: "U-"
    startAt: 100
- name: full_name
  type: fullName
- name: email
  type: email
  options:
    useNameColumn: full_name
    domain: corp.test
- name: plan
  type: oneOf
  options:
    values: [free, pro, enterprise]
- name: score
  type: number
  options:
    min: 5
    max: 5
    decimals: 0
"#;

fn load_people_spec(workspace: &TestWorkspace) -> Vec<ColumnDefinition> {
    let path = workspace.write("people.yml", PEOPLE_SPEC);
    load_column_definitions(&path).expect("spec loads")
}

#[test]
fn yaml_spec_drives_generation_end_to_end() {
    let workspace = TestWorkspace::new();
    let columns = load_people_spec(&workspace);
    assert_eq!(columns.len(), 5);
    assert_eq!(columns[1].kind, GeneratorType::FullName);

    let mut rng = StdRng::seed_from_u64(11);
    let dataset = generate_with(&columns, 5, &WordListProvider, &mut rng).expect("generates");
    assert_eq!(
        dataset.columns,
        vec!["id", "full_name", "email", "plan", "score"]
    );
    assert_eq!(dataset.rows.len(), 5);

    for (index, row) in dataset.rows.iter().enumerate() {
        assert_eq!(row.get("id").as_display(), format!("U-{}", 100 + index));
        let email = row.get("email").as_display();
        assert!(email.ends_with("@corp.test"), "unexpected email {email}");
        // Email derives from the name generated earlier in the same row.
        let name = row.get("full_name").as_display().to_lowercase();
        let slug = name.replace(' ', ".");
        assert!(email.starts_with(&slug), "{email} does not match {slug}");
        assert_eq!(row.get("score"), Value::Number(5.0));
        let plan = row.get("plan").as_display();
        assert!(["free", "pro", "enterprise"].contains(&plan.as_str()));
    }
}

#[test]
fn json_specs_load_too() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "columns.json",
        r#"[{"name": "n", "type": "number", "options": {"min": 2, "max": 3}}]"#,
    );
    let columns = load_column_definitions(&path).expect("json spec loads");
    assert_eq!(columns[0].kind, GeneratorType::Number);
    assert_eq!(columns[0].options.min, Some(2.0));
}

#[test]
fn generation_is_all_or_nothing() {
    assert!(matches!(generate(&[], 5), Err(GenerationError::NoColumns)));

    let workspace = TestWorkspace::new();
    let columns = load_people_spec(&workspace);
    assert!(matches!(
        generate(&columns, 0),
        Err(GenerationError::RowCountOutOfRange { .. })
    ));
    assert!(matches!(
        generate(&columns, MAX_ROW_COUNT + 1),
        Err(GenerationError::RowCountOutOfRange { .. })
    ));
}

#[test]
fn max_row_count_generates_fully() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "ids.yml",
        "- name: id\n  type: id\n  options:\n    startAt: 1\n",
    );
    let columns = load_column_definitions(&path).expect("spec loads");
    let dataset = generate(&columns, MAX_ROW_COUNT).expect("generates at the cap");
    assert_eq!(dataset.rows.len(), MAX_ROW_COUNT);
    assert_eq!(
        dataset.rows.last().unwrap().get("id").as_display(),
        MAX_ROW_COUNT.to_string()
    );
}
