//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    CategoryId, Error,
    category::{Category, CategoryName, NewCategory},
};

/// Create a category and return it with its generated ID.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, description) VALUES (?1, ?2);",
        (category.name.as_ref(), &category.description),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: category.name,
        description: category.description,
    })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `category_id` does not refer to a valid category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, description FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered by ID.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, description FROM category ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Replace a category's name and description. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, description = ?2 WHERE id = ?3",
        (category.name.as_ref(), &category.description, category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(Category {
        id: category_id,
        name: category.name,
        description: category.description,
    })
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Transaction details keep the category ID and the name captured at checkout,
/// so deleting a category does not change past transactions.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let description = row.get(2)?;

    Ok(Category {
        id,
        name,
        description,
    })
}
