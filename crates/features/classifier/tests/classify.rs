use proptest::prelude::*;
use sfa_classifier::{FieldDescriptor, FieldType, classify, rules};

fn named(name: &str) -> FieldDescriptor {
    FieldDescriptor::default().with_type("text").with_name(name)
}

#[test]
fn english_keywords() {
    let cases = [
        ("user_email", FieldType::Email),
        ("mobile_phone", FieldType::Phone),
        ("postal_code", FieldType::Zipcode),
        ("street_address", FieldType::Address),
        ("city", FieldType::City),
        ("state", FieldType::State),
        ("first_name", FieldType::FirstName),
        ("firstname", FieldType::FirstName),
        ("last-name", FieldType::LastName),
        ("company", FieldType::Company),
        ("comment", FieldType::Text),
    ];

    for (name, expected) in cases {
        assert_eq!(classify(&named(name)), expected, "name={name}");
    }
}

#[test]
fn japanese_keywords() {
    let cases = [
        ("メールアドレス", FieldType::Email),
        ("電話番号", FieldType::Phone),
        ("郵便番号", FieldType::Zipcode),
        ("住所", FieldType::Address),
        ("市区町村", FieldType::City),
        ("都道府県", FieldType::State),
        ("姓", FieldType::LastName),
        ("会社", FieldType::Company),
    ];

    for (label, expected) in cases {
        let field = FieldDescriptor::default().with_label(label);
        assert_eq!(classify(&field), expected, "label={label}");
    }
}

#[test]
fn earlier_rule_wins_on_overlap() {
    // "email address" hits both email and address.
    assert_eq!(classify(&named("email_address")), FieldType::Email);
    // 会社名 contains 名, and first name ranks above company.
    let field = FieldDescriptor::default().with_label("会社名");
    assert_eq!(classify(&field), FieldType::FirstName);
}

#[test]
fn sources_other_than_name_are_consulted() {
    let by_id = FieldDescriptor::default().with_id("ZipCode");
    let by_placeholder = FieldDescriptor::default().with_placeholder("Your City");
    let by_enclosing = FieldDescriptor::default().with_enclosing_label("Company name");
    let by_sibling = FieldDescriptor::default().with_previous_sibling("LABEL", "Last name");
    let by_type = FieldDescriptor::default().with_type("tel");

    assert_eq!(classify(&by_id), FieldType::Zipcode);
    assert_eq!(classify(&by_placeholder), FieldType::City);
    assert_eq!(classify(&by_enclosing), FieldType::Company);
    assert_eq!(classify(&by_sibling), FieldType::LastName);
    assert_eq!(classify(&by_type), FieldType::Phone);
}

#[test]
fn non_label_sibling_is_ignored() {
    let field = FieldDescriptor::default().with_previous_sibling("div", "Phone");
    assert_eq!(classify(&field), FieldType::Text);
}

#[test]
fn descriptor_from_host_json() {
    let json = r#"{"inputType":"text","name":"addr1","placeholder":"Street address"}"#;
    let field: FieldDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(classify(&field), FieldType::Address);
}

proptest! {
    #[test]
    fn classify_is_total_and_deterministic(
        name in ".{0,24}",
        id in ".{0,24}",
        placeholder in ".{0,24}",
        label in ".{0,24}",
    ) {
        let field = FieldDescriptor::default()
            .with_name(name)
            .with_id(id)
            .with_placeholder(placeholder)
            .with_label(label);

        let first = classify(&field);
        prop_assert_eq!(first, classify(&field));
        prop_assert!(
            first == FieldType::Text || rules().iter().any(|r| r.field_type == first)
        );
    }

    #[test]
    fn keyword_prefix_never_loses_to_a_lower_rule(rule in 0usize..9, noise in "[0-9 ]{0,12}") {
        let keyword = match rules()[rule].field_type {
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Zipcode => "zip",
            FieldType::Address => "address",
            FieldType::City => "city",
            FieldType::State => "state",
            FieldType::FirstName => "firstname",
            FieldType::LastName => "lastname",
            _ => "company",
        };
        let field = named(&format!("{keyword}{noise}"));
        prop_assert_eq!(classify(&field), rules()[rule].field_type);
    }
}
