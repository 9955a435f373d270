use regex::RegexSet;
use sfa_domain::FieldType;
use std::sync::LazyLock;

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field_type: FieldType,
    /// Keyword pattern matched against the lower-cased haystack.
    pub pattern: &'static str,
    /// Declared `type` attributes that select this rule without any keyword.
    pub input_types: &'static [&'static str],
}

/// Classification rules in priority order. The first matching row wins.
///
/// Each pattern carries an English and a Japanese keyword set.
pub static RULES: [Rule; 9] = [
    Rule { field_type: FieldType::Email, pattern: "email|メール", input_types: &["email"] },
    Rule { field_type: FieldType::Phone, pattern: "phone|tel|電話", input_types: &[] },
    Rule { field_type: FieldType::Zipcode, pattern: "zip|postal|郵便", input_types: &[] },
    Rule { field_type: FieldType::Address, pattern: "address|住所", input_types: &[] },
    Rule { field_type: FieldType::City, pattern: "city|市区町村", input_types: &[] },
    Rule { field_type: FieldType::State, pattern: "state|prefecture|都道府県", input_types: &[] },
    Rule { field_type: FieldType::FirstName, pattern: "first.*name|名|firstname", input_types: &[] },
    Rule { field_type: FieldType::LastName, pattern: "last.*name|姓|lastname", input_types: &[] },
    Rule { field_type: FieldType::Company, pattern: "company|会社", input_types: &[] },
];

static MATCHER: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(RULES.iter().map(|rule| rule.pattern)).expect("rule patterns are valid regexes")
});

/// Index of the highest-priority rule whose keywords occur in `haystack`.
pub(crate) fn first_hit(haystack: &str) -> Option<usize> {
    MATCHER.matches(haystack).into_iter().next()
}
