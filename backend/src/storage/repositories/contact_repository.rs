//! SQL for the contact, hobby and pet tables.
//!
//! Every statement runs on a caller-supplied connection so the service can
//! group several of them into one transaction.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::{ChildKind, ChildRecord, Contact, ValidContact};
use crate::storage::connection::SchemaVariant;

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

const CONTACT_COLUMNS: &str =
    "id, first_name, last_name, street, city, state, zip, phone, email, birthday";

/// Stateless repository over the contact tables
pub struct ContactRepository;

impl ContactRepository {
    /// Insert a contact and return its assigned id
    pub async fn insert_contact(conn: &mut SqliteConnection, contact: &ValidContact) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO contact (first_name, last_name, street, city, state, zip, phone, email, birthday)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.street)
        .bind(&contact.city)
        .bind(&contact.state)
        .bind(&contact.zip)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(contact.birthday.map(format_birthday))
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replace all scalar fields of a contact
    pub async fn update_contact(
        conn: &mut SqliteConnection,
        id: i64,
        contact: &ValidContact,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE contact
            SET first_name = ?, last_name = ?, street = ?, city = ?, state = ?,
                zip = ?, phone = ?, email = ?, birthday = ?
            WHERE id = ?
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.street)
        .bind(&contact.city)
        .bind(&contact.state)
        .bind(&contact.zip)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(contact.birthday.map(format_birthday))
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Delete a contact; its children go with it through the cascade
    pub async fn delete_contact(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn contact_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM contact WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.is_some())
    }

    pub async fn find_contact(conn: &mut SqliteConnection, id: i64) -> Result<Option<Contact>, sqlx::Error> {
        let row = sqlx::query(&format!("SELECT {CONTACT_COLUMNS} FROM contact WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(contact_from_row).transpose()
    }

    /// All contacts ordered by last name, then first name, then id
    pub async fn list_contacts(conn: &mut SqliteConnection) -> Result<Vec<Contact>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact ORDER BY last_name ASC, first_name ASC, id ASC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(contact_from_row).collect()
    }

    pub async fn insert_child(
        conn: &mut SqliteConnection,
        kind: ChildKind,
        contact_id: i64,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (name, contact_id) VALUES (?, ?)",
            kind.table()
        ))
        .bind(name)
        .bind(contact_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Children of one contact, ordered by id
    pub async fn children_of(
        conn: &mut SqliteConnection,
        kind: ChildKind,
        contact_id: i64,
    ) -> Result<Vec<ChildRecord>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT id, contact_id, name FROM {} WHERE contact_id = ? ORDER BY id ASC",
            kind.table()
        ))
        .bind(contact_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(child_from_row).collect()
    }

    /// Every child of one kind, ordered by id
    pub async fn all_children(conn: &mut SqliteConnection, kind: ChildKind) -> Result<Vec<ChildRecord>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT id, contact_id, name FROM {} ORDER BY id ASC",
            kind.table()
        ))
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(child_from_row).collect()
    }

    /// Delete every row of the variant's tables and restart their id sequences at 1
    pub async fn clear_all(conn: &mut SqliteConnection, variant: SchemaVariant) -> Result<(), sqlx::Error> {
        for table in variant.tables() {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *conn)
                .await?;
        }

        // sqlite_sequence holds the AUTOINCREMENT high-water mark per table
        for table in variant.tables() {
            sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?")
                .bind(*table)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }
}

fn format_birthday(date: NaiveDate) -> String {
    date.format(BIRTHDAY_FORMAT).to_string()
}

fn contact_from_row(row: &SqliteRow) -> Result<Contact, sqlx::Error> {
    let birthday: Option<String> = row.try_get("birthday")?;
    let birthday = birthday
        .map(|raw| NaiveDate::parse_from_str(&raw, BIRTHDAY_FORMAT))
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "birthday".to_string(),
            source: Box::new(e),
        })?;

    Ok(Contact {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        street: row.try_get("street")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        zip: row.try_get("zip")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        birthday,
        children: None,
    })
}

fn child_from_row(row: &SqliteRow) -> Result<ChildRecord, sqlx::Error> {
    Ok(ChildRecord {
        id: row.try_get("id")?,
        contact_id: row.try_get("contact_id")?,
        name: row.try_get("name")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::connection::DbConnection;

    fn barney() -> ValidContact {
        ValidContact {
            first_name: "Barney".to_string(),
            last_name: "Rubble".to_string(),
            street: Some("123 Granite St".to_string()),
            city: Some("Bedrock".to_string()),
            state: Some("NA".to_string()),
            zip: Some("123".to_string()),
            phone: Some("2".to_string()),
            email: None,
            birthday: NaiveDate::from_ymd_opt(1970, 3, 1),
        }
    }

    async fn setup_test() -> DbConnection {
        DbConnection::init_in_memory(SchemaVariant::WithChildren)
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_insert_and_find_contact() {
        let db = setup_test().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let id = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        assert_eq!(id, 1);

        let found = ContactRepository::find_contact(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Barney");
        assert_eq!(found.email, None);
        assert_eq!(found.birthday, NaiveDate::from_ymd_opt(1970, 3, 1));
        assert!(found.children.is_none());

        assert!(ContactRepository::find_contact(&mut conn, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_birthday_stored_as_iso_text() {
        let db = setup_test().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let id = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        let raw: String = sqlx::query("SELECT birthday FROM contact WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .unwrap()
            .get("birthday");
        assert_eq!(raw, "1970-03-01");
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let db = setup_test().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let first = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        assert!(ContactRepository::delete_contact(&mut conn, first).await.unwrap());
        assert!(!ContactRepository::delete_contact(&mut conn, first).await.unwrap());

        let second = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_clear_all_resets_sequences() {
        let db = setup_test().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let id = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        ContactRepository::insert_child(&mut conn, ChildKind::Pet, id, "Hoppy").await.unwrap();
        ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();

        ContactRepository::clear_all(&mut conn, SchemaVariant::WithChildren).await.unwrap();
        assert!(ContactRepository::list_contacts(&mut conn).await.unwrap().is_empty());
        assert!(ContactRepository::all_children(&mut conn, ChildKind::Pet).await.unwrap().is_empty());

        let id = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        assert_eq!(id, 1);
        let pet_id = ContactRepository::insert_child(&mut conn, ChildKind::Pet, id, "Hoppy").await.unwrap();
        assert_eq!(pet_id, 1);
    }

    #[tokio::test]
    async fn test_children_ordered_by_id() {
        let db = setup_test().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let id = ContactRepository::insert_contact(&mut conn, &barney()).await.unwrap();
        ContactRepository::insert_child(&mut conn, ChildKind::Hobby, id, "Bowling").await.unwrap();
        ContactRepository::insert_child(&mut conn, ChildKind::Hobby, id, "Archery").await.unwrap();

        let hobbies = ContactRepository::children_of(&mut conn, ChildKind::Hobby, id).await.unwrap();
        let names: Vec<&str> = hobbies.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Bowling", "Archery"]);
        assert!(hobbies.iter().all(|h| h.contact_id == id));

        let pets = ContactRepository::children_of(&mut conn, ChildKind::Pet, id).await.unwrap();
        assert!(pets.is_empty());
    }
}
