use chrono::DateTime;
use spendlog_core::{now_rfc3339, Category, Expense, ExpenseFields, ExpenseId};

fn sample_fields() -> ExpenseFields {
    ExpenseFields {
        amount: "12.50".to_string(),
        category: Category::Food,
        note: "lunch".to_string(),
        date: "2026-03-01T12:00:00.000Z".to_string(),
    }
}

#[test]
fn category_parse_accepts_every_label_case_insensitively() {
    for category in Category::ALL {
        assert_eq!(Category::parse(category.as_str()), Some(category));
        assert_eq!(
            Category::parse(&category.as_str().to_ascii_uppercase()),
            Some(category)
        );
    }
    assert_eq!(Category::parse("  travel "), Some(Category::Travel));
    assert_eq!(Category::parse("groceries"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn expense_serialization_uses_expected_wire_fields() {
    let expense = Expense::from_fields(ExpenseId::new("1742212345678"), &sample_fields());

    let json = serde_json::to_value(&expense).unwrap();
    assert_eq!(json["id"], "1742212345678");
    assert_eq!(json["amount"], "12.50");
    assert_eq!(json["category"], "Food");
    assert_eq!(json["note"], "lunch");
    assert_eq!(json["date"], "2026-03-01T12:00:00.000Z");

    let decoded: Expense = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, expense);
}

#[test]
fn validate_rejects_empty_and_whitespace_amount() {
    let mut fields = sample_fields();
    fields.amount = String::new();
    assert!(fields.validate().is_err());

    fields.amount = "   ".to_string();
    assert!(fields.validate().is_err());

    fields.amount = "7".to_string();
    assert!(fields.validate().is_ok());
}

#[test]
fn amount_is_not_numerically_validated() {
    let mut fields = sample_fields();
    fields.amount = "about twelve".to_string();
    assert!(fields.validate().is_ok());
}

#[test]
fn fields_roundtrip_through_expense() {
    let fields = sample_fields();
    let expense = Expense::from_fields(ExpenseId::new("a"), &fields);
    assert_eq!(expense.fields(), fields);
}

#[test]
fn now_rfc3339_produces_a_parseable_timestamp() {
    let stamp = now_rfc3339();
    let parsed = DateTime::parse_from_rfc3339(&stamp);
    assert!(parsed.is_ok(), "unparseable timestamp: {stamp}");
    assert!(stamp.ends_with('Z'));
}
