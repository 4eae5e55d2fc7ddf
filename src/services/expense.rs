//! Expense service
//!
//! Business logic for the five tracker operations. Every call reads the
//! store fresh from disk; mutating calls write the whole list back and
//! record an audit entry.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::storage::{next_id, position, Storage};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Input for adding a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
}

/// Input for updating an expense; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub description: Option<String>,
    pub amount: Option<Money>,
}

/// Result of a summary query
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    /// Month-of-year filter that was applied, if any
    pub month: Option<u32>,
    /// Sum of the matching amounts
    pub total: Money,
    /// Number of matching expenses
    pub count: usize,
}

fn negative_amount() -> TrackerError {
    TrackerError::Validation("Amount cannot be negative!".into())
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new expense and return it with its assigned id
    pub fn add(&self, input: CreateExpenseInput) -> TrackerResult<Expense> {
        if input.amount.is_negative() {
            return Err(negative_amount());
        }

        let mut expenses = self.storage.expenses.load()?;

        let expense = Expense::new(
            next_id(&expenses)?,
            input.description,
            input.amount,
            input.date,
        );
        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        expenses.push(expense.clone());
        self.storage.expenses.save(&expenses)?;

        self.storage.log_create(
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Update the description and/or amount of an expense
    ///
    /// A blank description counts as not supplied. A negative amount rejects
    /// the whole update.
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> TrackerResult<Expense> {
        let mut expenses = self.storage.expenses.load()?;
        let index = position(&expenses, id).ok_or_else(|| TrackerError::expense_not_found(id))?;

        if input.amount.is_some_and(|amount| amount.is_negative()) {
            return Err(negative_amount());
        }

        let before = expenses[index].clone();
        let expense = &mut expenses[index];

        if let Some(description) = input.description {
            if !description.trim().is_empty() {
                expense.description = description;
            }
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }

        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        let after = expense.clone();

        self.storage.expenses.save(&expenses)?;

        self.storage.log_update(
            after.id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Remove an expense, returning the removed record
    pub fn delete(&self, id: ExpenseId) -> TrackerResult<Expense> {
        let mut expenses = self.storage.expenses.load()?;
        let index = position(&expenses, id).ok_or_else(|| TrackerError::expense_not_found(id))?;

        let removed = expenses.remove(index);
        self.storage.expenses.save(&expenses)?;

        self.storage.log_delete(
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// All expenses in store order
    pub fn list(&self) -> TrackerResult<Vec<Expense>> {
        self.storage.expenses.load()
    }

    /// Total of all expenses, or of those whose date falls in `month`
    /// (1-12, any year)
    ///
    /// Returns `None` when the store is empty.
    pub fn summary(&self, month: Option<u32>) -> TrackerResult<Option<ExpenseSummary>> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(TrackerError::Validation(format!(
                    "Month must be between 1 and 12, got {}",
                    m
                )));
            }
        }

        let expenses = self.storage.expenses.load()?;
        if expenses.is_empty() {
            return Ok(None);
        }

        let matching: Vec<&Expense> = expenses
            .iter()
            .filter(|e| month.map_or(true, |m| e.month() == m))
            .collect();

        Ok(Some(ExpenseSummary {
            month,
            total: matching.iter().map(|e| e.amount).sum(),
            count: matching.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::{Settings, TrackerPaths};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(description: &str, amount: &str, date: NaiveDate) -> CreateExpenseInput {
        CreateExpenseInput {
            description: description.to_string(),
            amount: Money::parse(amount).unwrap(),
            date,
        }
    }

    fn raw_store(storage: &Storage) -> Vec<u8> {
        std::fs::read(storage.expenses.path()).unwrap()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let today = date(2024, 6, 3);

        let coffee = service.add(input("coffee", "3.50", today)).unwrap();
        let book = service.add(input("book", "12.00", today)).unwrap();

        assert_eq!(coffee.id, ExpenseId::new(1));
        assert_eq!(coffee.date, today);
        assert_eq!(book.id, ExpenseId::new(2));

        let listed = service.list().unwrap();
        assert_eq!(listed, vec![coffee, book]);
    }

    #[test]
    fn test_add_uses_max_plus_one_after_delete() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let today = date(2024, 6, 3);

        for name in ["a", "b", "c"] {
            service.add(input(name, "1", today)).unwrap();
        }
        service.delete(ExpenseId::new(2)).unwrap();
        let d = service.add(input("d", "1", today)).unwrap();
        assert_eq!(d.id, ExpenseId::new(4));

        service.delete(ExpenseId::new(4)).unwrap();
        let e = service.add(input("e", "1", today)).unwrap();
        assert_eq!(e.id, ExpenseId::new(4));
    }

    #[test]
    fn test_add_negative_amount_leaves_store_untouched() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.add(input("refund", "-1", date(2024, 1, 1))).unwrap_err();
        assert!(err.is_validation());
        assert!(!storage.expenses.path().exists());
        assert!(service.list().unwrap().is_empty());

        // No id consumed
        let first = service.add(input("tea", "2", date(2024, 1, 1))).unwrap();
        assert_eq!(first.id, ExpenseId::new(1));
    }

    #[test]
    fn test_add_blank_description_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.add(input("   ", "2", date(2024, 1, 1))).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_add_keeps_description_as_given() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let e = service.add(input("  corner shop ", "2", date(2024, 1, 1))).unwrap();
        assert_eq!(e.description, "  corner shop ");
        assert_eq!(service.list().unwrap()[0].description, "  corner shop ");
    }

    #[test]
    fn test_add_when_ids_exhausted() {
        let (_temp, storage) = create_test_storage();
        std::fs::write(
            storage.expenses.path(),
            r#"[{"id": 18446744073709551615, "description": "last", "amount": 1.0, "date": "2024-01-01"}]"#,
        )
        .unwrap();
        let before = raw_store(&storage);
        let service = ExpenseService::new(&storage);

        let err = service.add(input("one more", "2", date(2024, 1, 2))).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(raw_store(&storage), before);
    }

    #[test]
    fn test_amount_that_cannot_be_stored_exactly_is_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service
            .add(input("yacht", "12345678901234567.89", date(2024, 1, 1)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!storage.expenses.path().exists());

        let created = service.add(input("coffee", "3.50", date(2024, 1, 1))).unwrap();
        let before = raw_store(&storage);
        let err = service
            .update(
                created.id,
                UpdateExpenseInput {
                    description: None,
                    amount: Some(Money::parse("12345678901234567.89").unwrap()),
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(raw_store(&storage), before);
    }

    #[test]
    fn test_add_zero_amount_allowed() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let e = service.add(input("free sample", "0", date(2024, 1, 1))).unwrap();
        assert!(e.amount.is_zero());
    }

    #[test]
    fn test_update_fields() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.add(input("coffee", "3.50", date(2024, 2, 10))).unwrap();

        let updated = service
            .update(
                created.id,
                UpdateExpenseInput {
                    description: Some("latte".into()),
                    amount: None,
                },
            )
            .unwrap();
        assert_eq!(updated.description, "latte");
        assert_eq!(updated.amount.value(), dec!(3.50));
        assert_eq!(updated.date, created.date);

        let updated = service
            .update(
                created.id,
                UpdateExpenseInput {
                    description: None,
                    amount: Some(Money::parse("4.25").unwrap()),
                },
            )
            .unwrap();
        assert_eq!(updated.description, "latte");
        assert_eq!(updated.amount.value(), dec!(4.25));

        assert_eq!(service.list().unwrap(), vec![updated]);
    }

    #[test]
    fn test_update_blank_description_is_ignored() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.add(input("coffee", "3.50", date(2024, 2, 10))).unwrap();

        let updated = service
            .update(
                created.id,
                UpdateExpenseInput {
                    description: Some("  ".into()),
                    amount: None,
                },
            )
            .unwrap();
        assert_eq!(updated.description, "coffee");
    }

    #[test]
    fn test_update_negative_amount_rejects_everything() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.add(input("coffee", "3.50", date(2024, 2, 10))).unwrap();
        let before = raw_store(&storage);

        let err = service
            .update(
                created.id,
                UpdateExpenseInput {
                    description: Some("renamed".into()),
                    amount: Some(Money::parse("-5").unwrap()),
                },
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(raw_store(&storage), before);
    }

    #[test]
    fn test_update_missing_id_does_not_write() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add(input("coffee", "3.50", date(2024, 2, 10))).unwrap();
        let before = raw_store(&storage);

        let err = service
            .update(
                ExpenseId::new(99),
                UpdateExpenseInput {
                    description: Some("x".into()),
                    amount: None,
                },
            )
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(raw_store(&storage), before);
    }

    #[test]
    fn test_update_on_empty_store_is_not_found() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service
            .update(ExpenseId::new(1), UpdateExpenseInput::default())
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!storage.expenses.path().exists());
    }

    #[test]
    fn test_delete_preserves_order() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let today = date(2024, 6, 3);
        for name in ["a", "b", "c"] {
            service.add(input(name, "1", today)).unwrap();
        }

        let removed = service.delete(ExpenseId::new(2)).unwrap();
        assert_eq!(removed.description, "b");

        let names: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_delete_twice() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add(input("coffee", "3.50", date(2024, 2, 10))).unwrap();
        service.add(input("book", "12", date(2024, 2, 10))).unwrap();

        service.delete(ExpenseId::new(1)).unwrap();
        let after_first = raw_store(&storage);

        let err = service.delete(ExpenseId::new(1)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(raw_store(&storage), after_first);
    }

    #[test]
    fn test_summary_totals() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add(input("coffee", "3.50", date(2024, 3, 1))).unwrap();
        service.add(input("book", "12.00", date(2024, 3, 20))).unwrap();
        service.add(input("gift", "0.10", date(2023, 3, 5))).unwrap();
        service.add(input("rent", "800.20", date(2024, 4, 1))).unwrap();

        let all = service.summary(None).unwrap().unwrap();
        assert_eq!(all.total.value(), dec!(815.80));
        assert_eq!(all.count, 4);

        // Month filter ignores the year
        let march = service.summary(Some(3)).unwrap().unwrap();
        assert_eq!(march.total.value(), dec!(15.60));
        assert_eq!(march.count, 3);
        assert_eq!(march.month, Some(3));

        let december = service.summary(Some(12)).unwrap().unwrap();
        assert!(december.total.is_zero());
        assert_eq!(december.count, 0);
    }

    #[test]
    fn test_summary_empty_store() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert_eq!(service.summary(None).unwrap(), None);
        assert_eq!(service.summary(Some(5)).unwrap(), None);
    }

    #[test]
    fn test_summary_rejects_bad_month() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(service.summary(Some(0)).unwrap_err().is_validation());
        assert!(service.summary(Some(13)).unwrap_err().is_validation());
    }

    #[test]
    fn test_corrupt_store_is_fatal() {
        let (_temp, storage) = create_test_storage();
        std::fs::write(storage.expenses.path(), "{ not an array").unwrap();
        let service = ExpenseService::new(&storage);

        assert!(matches!(service.list(), Err(TrackerError::Corrupt(_))));
        let err = service.add(input("x", "1", date(2024, 1, 1))).unwrap_err();
        assert!(matches!(err, TrackerError::Corrupt(_)));
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.add(input("coffee", "3.50", date(2024, 2, 10))).unwrap();
        service
            .update(
                created.id,
                UpdateExpenseInput {
                    description: None,
                    amount: Some(Money::parse("4").unwrap()),
                },
            )
            .unwrap();
        service.delete(created.id).unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, [Operation::Create, Operation::Update, Operation::Delete]);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("amount: 3.5 -> 4.0"));
    }
}
