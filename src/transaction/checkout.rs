//! Turns a list of picked categories into a stored transaction.

use rusqlite::Connection;

use crate::{
    Error,
    category::get_category,
    transaction::{
        CheckoutItem, Transaction,
        core::{insert_transaction, insert_transaction_detail},
    },
};

/// Check out `items` as a single transaction.
///
/// Every item is checked before anything is written, then the categories are
/// looked up and the transaction and its details are inserted inside one
/// database transaction. Either every row becomes visible or none do.
///
/// An empty list of items creates a transaction with a total of zero and no
/// details.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidQuantity] if an item has a quantity of zero or less,
/// - [Error::TotalOverflow] if the quantities do not fit in the total,
/// - [Error::CategoryNotFound] if an item refers to a category that does not exist,
/// - or [Error::SqlError] if the database fails to read, insert or commit.
pub fn create_transaction(
    items: &[CheckoutItem],
    connection: &Connection,
) -> Result<Transaction, Error> {
    let total_amount = checkout_total(items)?;

    // Rolls back when dropped, so every early return below leaves no rows behind.
    let tx = connection.unchecked_transaction()?;

    let mut picked = Vec::with_capacity(items.len());
    for item in items {
        let category = get_category(item.category_id, &tx).map_err(|error| match error {
            Error::NotFound => Error::CategoryNotFound(item.category_id),
            error => error,
        })?;

        picked.push((category, item.quantity));
    }

    let (transaction_id, created_at) = insert_transaction(total_amount, &tx)?;

    let details = picked
        .iter()
        .map(|(category, quantity)| {
            insert_transaction_detail(transaction_id, category, *quantity, &tx)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tx.commit()?;

    tracing::debug!(
        "Checked out transaction {transaction_id} with {} items totalling {total_amount}",
        details.len()
    );

    Ok(Transaction {
        id: transaction_id,
        total_amount,
        created_at,
        details,
    })
}

/// Sum the quantities of `items`, rejecting any quantity that is not positive.
fn checkout_total(items: &[CheckoutItem]) -> Result<i64, Error> {
    items.iter().try_fold(0i64, |total, item| {
        if item.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                category_id: item.category_id,
                quantity: item.quantity,
            });
        }

        total
            .checked_add(item.quantity)
            .ok_or(Error::TotalOverflow)
    })
}


#[cfg(test)]
mod create_transaction_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, NewCategory, create_category, update_category},
        db::initialize,
        transaction::{
            CheckoutItem, create_transaction,
            core::{count_transaction_details, count_transactions, get_transaction},
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        for name in ["Duelist", "Controller"] {
            create_category(
                NewCategory {
                    name: CategoryName::new_unchecked(name),
                    description: String::new(),
                },
                &conn,
            )
            .expect("Could not create test category");
        }

        conn
    }

    fn item(category_id: i64, quantity: i64) -> CheckoutItem {
        CheckoutItem {
            category_id,
            quantity,
        }
    }

    fn assert_nothing_stored(conn: &Connection) {
        assert_eq!(count_transactions(conn), Ok(0));
        assert_eq!(count_transaction_details(conn), Ok(0));
    }

    #[test]
    fn checkout_stores_transaction_and_details() {
        let conn = get_test_connection();

        let transaction = create_transaction(&[item(1, 2), item(2, 3)], &conn)
            .expect("Could not create transaction");

        assert_eq!(transaction.total_amount, 5);
        assert_eq!(transaction.details.len(), 2);
        assert_eq!(transaction.details[0].category_id, 1);
        assert_eq!(transaction.details[0].category_name, "Duelist");
        assert_eq!(transaction.details[0].quantity, 2);
        assert_eq!(transaction.details[1].category_id, 2);
        assert_eq!(transaction.details[1].category_name, "Controller");
        assert_eq!(transaction.details[1].quantity, 3);
        assert!(
            transaction
                .details
                .iter()
                .all(|detail| detail.transaction_id == transaction.id)
        );

        assert_eq!(get_transaction(transaction.id, &conn), Ok(transaction));
    }

    #[test]
    fn total_is_sum_not_last_quantity() {
        let conn = get_test_connection();

        let transaction = create_transaction(&[item(2, 7), item(1, 1)], &conn).unwrap();

        assert_eq!(transaction.total_amount, 8);
    }

    #[test]
    fn repeated_category_gets_one_detail_per_item() {
        let conn = get_test_connection();

        let transaction = create_transaction(&[item(1, 1), item(1, 4)], &conn).unwrap();

        assert_eq!(transaction.details.len(), 2);
        assert_eq!(transaction.total_amount, 5);
    }

    #[test]
    fn unknown_category_fails_and_stores_nothing() {
        let conn = get_test_connection();

        let result = create_transaction(&[item(99, 1)], &conn);

        assert_eq!(result, Err(Error::CategoryNotFound(99)));
        assert_nothing_stored(&conn);
    }

    #[test]
    fn unknown_category_after_valid_items_rolls_back() {
        let conn = get_test_connection();

        let result = create_transaction(&[item(1, 2), item(2, 3), item(42, 1)], &conn);

        assert_eq!(result, Err(Error::CategoryNotFound(42)));
        assert_nothing_stored(&conn);
    }

    #[test]
    fn invalid_quantity_fails_before_any_write() {
        let conn = get_test_connection();

        let result = create_transaction(&[item(1, 2), item(2, 0)], &conn);

        assert_eq!(
            result,
            Err(Error::InvalidQuantity {
                category_id: 2,
                quantity: 0
            })
        );
        assert_nothing_stored(&conn);
    }

    #[test]
    fn invalid_quantity_is_reported_before_unknown_category() {
        let conn = get_test_connection();

        let result = create_transaction(&[item(99, 1), item(1, -5)], &conn);

        assert_eq!(
            result,
            Err(Error::InvalidQuantity {
                category_id: 1,
                quantity: -5
            })
        );
    }

    #[test]
    fn empty_checkout_creates_empty_transaction() {
        let conn = get_test_connection();

        let transaction = create_transaction(&[], &conn).expect("Could not create transaction");

        assert_eq!(transaction.total_amount, 0);
        assert!(transaction.details.is_empty());
        assert_eq!(count_transactions(&conn), Ok(1));
    }

    #[test]
    fn renaming_category_keeps_checked_out_name() {
        let conn = get_test_connection();
        let transaction = create_transaction(&[item(1, 2)], &conn).unwrap();

        update_category(
            1,
            NewCategory {
                name: CategoryName::new_unchecked("Renamed"),
                description: String::new(),
            },
            &conn,
        )
        .unwrap();

        let stored = get_transaction(transaction.id, &conn).unwrap();
        assert_eq!(stored.details[0].category_name, "Duelist");
    }

    #[test]
    fn each_checkout_gets_new_id() {
        let conn = get_test_connection();

        let first = create_transaction(&[item(1, 1)], &conn).unwrap();
        let second = create_transaction(&[item(2, 1)], &conn).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(count_transactions(&conn), Ok(2));
        assert_eq!(count_transaction_details(&conn), Ok(2));
    }
}
