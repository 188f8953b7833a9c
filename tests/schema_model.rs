//! Schema model invariants and the collection-editing scenarios

use bucket_cms::error::SchemaError;
use bucket_cms::schema::Collection;
use proptest::prelude::*;

#[test]
fn posts_scenario() {
    // Posts with fields [{name:"Title", typeName:"Text"}]
    let posts = Collection::new("Posts", "Title").unwrap();
    assert_eq!(posts.fields.len(), 1);

    // addField(Posts, "Category", "SelectField") -> fields length 2
    let posts = posts.add_field("Category", "SelectField").unwrap();
    assert_eq!(posts.fields.len(), 2);

    // addOption x2 -> ["News", "Tech"]
    let posts = posts.add_option(1, "News").unwrap().add_option(1, "Tech").unwrap();
    assert_eq!(posts.fields[1].options, vec!["News", "Tech"]);

    // removeOption(Posts, 1, 0) -> ["Tech"]
    let posts = posts.remove_option(1, 0).unwrap();
    assert_eq!(posts.fields[1].options, vec!["Tech"]);

    // changeFieldType(Posts, 1, "URL") discards options
    let posts = posts.change_field_type(1, "URL").unwrap();
    assert_eq!(posts.fields[1].type_name, "URL");
    assert!(posts.fields[1].options.is_empty());
}

#[test]
fn protected_field_errors() {
    let c = Collection::new("Posts", "Title")
        .unwrap()
        .add_field("Body", "RichText")
        .unwrap();

    assert!(matches!(c.delete_field(0), Err(SchemaError::ProtectedField(0, _))));
    assert!(matches!(
        c.change_field_type(0, "URL"),
        Err(SchemaError::ProtectedField(0, _))
    ));
    assert!(matches!(c.reorder(0, 1), Err(SchemaError::ProtectedField(0, _))));
    assert!(matches!(c.reorder(1, 0), Err(SchemaError::ProtectedField(0, _))));
}

#[test]
fn duplicate_field_name_regardless_of_count() {
    let mut c = Collection::new("Posts", "Title").unwrap();
    for i in 0..20 {
        c = c.add_field(format!("Field{}", i), "Text").unwrap();
    }
    assert!(matches!(
        c.add_field("Field7", "URL"),
        Err(SchemaError::DuplicateFieldName(_))
    ));
    assert!(matches!(
        c.rename_field(1, "Field7"),
        Err(SchemaError::DuplicateFieldName(_))
    ));
}

#[test]
fn json_round_trip_preserves_everything() {
    let c = Collection::new("Team Members", "Name")
        .unwrap()
        .add_field("Role", "SelectField")
        .unwrap()
        .add_option(1, "Engineer")
        .unwrap()
        .add_option(1, "Designer")
        .unwrap()
        .add_field("Photo", "ImageUpload")
        .unwrap()
        .add_field("Links", "FileLibrary")
        .unwrap()
        .reorder(3, 1)
        .unwrap();

    let json = serde_json::to_string(&c).unwrap();
    let back: Collection = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    back.validate().unwrap();
}

/// One random schema-editing operation
#[derive(Debug, Clone)]
enum Op {
    Add(String, usize),
    Rename(usize, String),
    Retype(usize, usize),
    AddOption(usize, String),
    RemoveOption(usize, usize),
    Delete(usize),
    Reorder(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let name = "[A-Za-z][A-Za-z0-9]{0,8}";
    prop_oneof![
        (name, 0..13usize).prop_map(|(n, t)| Op::Add(n, t)),
        (0..6usize, name).prop_map(|(i, n)| Op::Rename(i, n)),
        (0..6usize, 0..13usize).prop_map(|(i, t)| Op::Retype(i, t)),
        (0..6usize, name).prop_map(|(i, v)| Op::AddOption(i, v)),
        (0..6usize, 0..4usize).prop_map(|(i, o)| Op::RemoveOption(i, o)),
        (0..6usize).prop_map(Op::Delete),
        (0..6usize, 0..6usize).prop_map(|(f, t)| Op::Reorder(f, t)),
    ]
}

proptest! {
    /// fields[0] is Text before and after any operation sequence; failed
    /// operations leave the collection untouched.
    #[test]
    fn first_field_always_text(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let types = bucket_cms::fields::field_types();
        let mut c = Collection::new("Posts", "Title").unwrap();

        for op in ops {
            let result = match op {
                Op::Add(name, t) => c.add_field(name, types[t % types.len()].name),
                Op::Rename(i, name) => c.rename_field(i, name),
                Op::Retype(i, t) => c.change_field_type(i, types[t % types.len()].name),
                Op::AddOption(i, v) => c.add_option(i, v),
                Op::RemoveOption(i, o) => c.remove_option(i, o),
                Op::Delete(i) => c.delete_field(i),
                Op::Reorder(f, t) => c.reorder(f, t),
            };
            if let Ok(next) = result {
                c = next;
            }

            prop_assert!(!c.fields.is_empty());
            prop_assert_eq!(c.fields[0].type_name.as_str(), "Text");
            c.validate().unwrap();
        }
    }
}
