use super::{Amount, Kind, Transaction};

/// Filter applied when listing transactions for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn matches(&self, kind: Kind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == Kind::Income,
            KindFilter::Expense => kind == Kind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Income => "income",
            KindFilter::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(KindFilter::All),
            "income" => Some(KindFilter::Income),
            "expense" => Some(KindFilter::Expense),
            _ => None,
        }
    }
}

/// Aggregate totals over the current record set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
}

/// Compute income and expense totals plus the running balance.
/// Balance = total income - total expense.
pub fn compute_totals(records: &[Transaction]) -> Totals {
    let total_income: Amount = records
        .iter()
        .filter(|t| t.kind == Kind::Income)
        .map(|t| t.amount)
        .sum();

    let total_expense: Amount = records
        .iter()
        .filter(|t| t.kind == Kind::Expense)
        .map(|t| t.amount)
        .sum();

    Totals {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Produce the display view of the ledger: records matching the filter,
/// most recent first. Equal timestamps keep insertion order (stable sort).
pub fn filtered_view(records: &[Transaction], filter: KindFilter) -> Vec<Transaction> {
    let mut view: Vec<Transaction> = records
        .iter()
        .filter(|t| filter.matches(t.kind))
        .cloned()
        .collect();

    view.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    view
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn record(description: &str, amount: Amount, kind: Kind, ms: i64) -> Transaction {
        Transaction::new(description, amount, kind).with_occurred_at(at(ms))
    }

    #[test]
    fn test_totals_empty() {
        let totals = compute_totals(&[]);

        assert_eq!(totals.total_income, 0.0);
        assert_eq!(totals.total_expense, 0.0);
        assert_eq!(totals.balance, 0.0);
    }

    #[test]
    fn test_totals_income_and_expense() {
        let records = vec![
            record("Salary", 1000.0, Kind::Income, 1_000),
            record("Rent", 400.0, Kind::Expense, 2_000),
        ];

        let totals = compute_totals(&records);
        assert_eq!(totals.total_income, 1000.0);
        assert_eq!(totals.total_expense, 400.0);
        assert_eq!(totals.balance, 600.0);
    }

    #[test]
    fn test_balance_identity() {
        let records = vec![
            record("Salary", 1000.0, Kind::Income, 1),
            record("Groceries", 85.5, Kind::Expense, 2),
            record("Refund", 19.99, Kind::Income, 3),
            record("Dinner", 42.0, Kind::Expense, 4),
        ];

        let totals = compute_totals(&records);
        assert_eq!(totals.balance, totals.total_income - totals.total_expense);
    }

    #[test]
    fn test_filtered_all_sorted_most_recent_first() {
        let records = vec![
            record("b", 1.0, Kind::Income, 2_000),
            record("c", 1.0, Kind::Expense, 3_000),
            record("a", 1.0, Kind::Income, 1_000),
        ];

        let view = filtered_view(&records, KindFilter::All);

        let descriptions: Vec<&str> = view.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_filtered_ties_keep_insertion_order() {
        let records = vec![
            record("first", 1.0, Kind::Income, 1_000),
            record("second", 2.0, Kind::Income, 1_000),
        ];

        let view = filtered_view(&records, KindFilter::All);

        assert_eq!(view[0].description, "first");
        assert_eq!(view[1].description, "second");
    }

    #[test]
    fn test_filtered_by_kind() {
        let records = vec![
            record("Salary", 1000.0, Kind::Income, 1),
            record("Bonus", 200.0, Kind::Income, 2),
            record("Rent", 400.0, Kind::Expense, 3),
        ];

        let expenses = filtered_view(&records, KindFilter::Expense);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Rent");

        let income = filtered_view(&records, KindFilter::Income);
        assert_eq!(income.len(), 2);
    }

    #[test]
    fn test_kind_filter_from_str() {
        assert_eq!(KindFilter::from_str("all"), Some(KindFilter::All));
        assert_eq!(KindFilter::from_str("income"), Some(KindFilter::Income));
        assert_eq!(KindFilter::from_str("expense"), Some(KindFilter::Expense));
        assert_eq!(KindFilter::from_str("both"), None);
    }
}
