use sqlx::{Sqlite, SqliteConnection, Transaction};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::domain::commands::{ContactFields, NewChildren};
use crate::domain::error::ContactError;
use crate::domain::fixtures::FIXTURE_CONTACTS;
use crate::domain::models::{ChildKind, Contact, ContactChildren, ValidChildren, ValidContact};
use crate::domain::validation::{validate_children, validate_contact};
use crate::storage::{ContactRepository, DbConnection, SchemaVariant};

/// The single entry point for reading and mutating contacts.
///
/// Each operation runs inside its own transaction. Validation and existence
/// checks happen before the first write, and on any error the transaction is
/// rolled back before the error is returned.
#[derive(Clone)]
pub struct ContactService {
    db: DbConnection,
}

impl ContactService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.db.variant()
    }

    /// Every contact sorted by (last name, first name)
    pub async fn list_all(&self) -> Result<Vec<Contact>, ContactError> {
        info!("Listing all contacts");

        let mut tx = self.db.begin().await?;
        let result = self.load_all(&mut tx).await.map_err(ContactError::from);
        let contacts = Self::finish(tx, result).await?;

        info!("Found {} contacts", contacts.len());
        Ok(contacts)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Contact, ContactError> {
        info!("Getting contact: {}", id);

        let mut tx = self.db.begin().await?;
        let result = self.load_one(&mut tx, id).await.map_err(ContactError::from);
        let contact = Self::finish(tx, result).await?;

        contact.ok_or_else(|| {
            warn!("Contact not found: {}", id);
            ContactError::NotFound(id)
        })
    }

    /// Create a contact, optionally with hobbies and pets, in one transaction
    pub async fn create(
        &self,
        fields: ContactFields,
        children: Option<NewChildren>,
    ) -> Result<Contact, ContactError> {
        info!("Creating contact: {} {}", fields.first_name, fields.last_name);

        let contact = validate_contact(&fields)?;
        let children = match children {
            Some(children) if self.variant().has_children() => validate_children(&children)?,
            Some(children) => {
                if !children.hobbies.is_empty() || !children.pets.is_empty() {
                    warn!("Ignoring hobbies and pets: store has no child tables");
                }
                ValidChildren::default()
            }
            None => ValidChildren::default(),
        };

        let mut tx = self.db.begin().await?;
        let result = self.insert_and_load(&mut tx, &contact, &children).await;
        let created = Self::finish(tx, result).await?;

        info!("Created contact {} with ID: {}", created.last_name, created.id);
        Ok(created)
    }

    /// Replace the nine scalar fields of a contact. Children are untouched.
    pub async fn update(&self, id: i64, fields: ContactFields) -> Result<Contact, ContactError> {
        info!("Updating contact: {}", id);

        let mut tx = self.db.begin().await?;
        let result = self.update_in(&mut tx, id, &fields).await;
        let updated = Self::finish(tx, result).await?;

        info!("Updated contact {} with ID: {}", updated.last_name, updated.id);
        Ok(updated)
    }

    /// Delete a contact together with its hobbies and pets
    pub async fn delete(&self, id: i64) -> Result<(), ContactError> {
        info!("Deleting contact: {}", id);

        let mut tx = self.db.begin().await?;
        let result = match ContactRepository::delete_contact(&mut tx, id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("Contact not found: {}", id);
                Err(ContactError::NotFound(id))
            }
            Err(e) => Err(ContactError::from(e)),
        };
        Self::finish(tx, result).await?;

        info!("Deleted contact with ID: {}", id);
        Ok(())
    }

    /// Discard all data and load the fixture set with ids starting at 1.
    ///
    /// Destructive and exclusive: must not run alongside other writes.
    pub async fn reinitialize(&self) -> Result<Vec<Contact>, ContactError> {
        warn!(
            "Reinitializing contact store ({} schema); existing data is discarded",
            self.variant()
        );

        let mut tx = self.db.begin().await?;
        let result = self.reseed_in(&mut tx).await;
        let contacts = Self::finish(tx, result).await?;

        info!("Reinitialized store with {} contacts", contacts.len());
        Ok(contacts)
    }

    /// Commit on success, roll back on failure
    async fn finish<T>(
        tx: Transaction<'static, Sqlite>,
        result: Result<T, ContactError>,
    ) -> Result<T, ContactError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_error);
                }
                Err(e)
            }
        }
    }

    async fn insert_and_load(
        &self,
        conn: &mut SqliteConnection,
        contact: &ValidContact,
        children: &ValidChildren,
    ) -> Result<Contact, ContactError> {
        let id = Self::insert_with_children(conn, contact, children).await?;
        let created = self.load_one(conn, id).await?.ok_or(sqlx::Error::RowNotFound)?;
        Ok(created)
    }

    async fn update_in(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        fields: &ContactFields,
    ) -> Result<Contact, ContactError> {
        if !ContactRepository::contact_exists(conn, id).await? {
            warn!("Contact not found: {}", id);
            return Err(ContactError::NotFound(id));
        }

        let contact = validate_contact(fields)?;
        ContactRepository::update_contact(conn, id, &contact).await?;
        self.load_one(conn, id).await?.ok_or(ContactError::NotFound(id))
    }

    async fn reseed_in(&self, conn: &mut SqliteConnection) -> Result<Vec<Contact>, ContactError> {
        let variant = self.variant();
        ContactRepository::clear_all(conn, variant).await?;

        for fixture in FIXTURE_CONTACTS.iter() {
            let contact = validate_contact(&fixture.fields())?;
            let children = if variant.has_children() {
                validate_children(&fixture.children())?
            } else {
                ValidChildren::default()
            };
            Self::insert_with_children(conn, &contact, &children).await?;
        }

        Ok(self.load_all(conn).await?)
    }

    async fn insert_with_children(
        conn: &mut SqliteConnection,
        contact: &ValidContact,
        children: &ValidChildren,
    ) -> Result<i64, sqlx::Error> {
        let id = ContactRepository::insert_contact(conn, contact).await?;
        for kind in ChildKind::ALL {
            for name in children.names(kind) {
                ContactRepository::insert_child(conn, kind, id, name).await?;
            }
        }
        Ok(id)
    }

    async fn load_one(&self, conn: &mut SqliteConnection, id: i64) -> Result<Option<Contact>, sqlx::Error> {
        let Some(mut contact) = ContactRepository::find_contact(conn, id).await? else {
            return Ok(None);
        };

        if self.variant().has_children() {
            let mut children = ContactChildren::default();
            for kind in ChildKind::ALL {
                for child in ContactRepository::children_of(conn, kind, id).await? {
                    children.push(kind, child);
                }
            }
            contact.children = Some(children);
        }

        Ok(Some(contact))
    }

    async fn load_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Contact>, sqlx::Error> {
        let mut contacts = ContactRepository::list_contacts(conn).await?;

        if self.variant().has_children() {
            let mut by_contact: HashMap<i64, ContactChildren> = HashMap::new();
            for kind in ChildKind::ALL {
                for child in ContactRepository::all_children(conn, kind).await? {
                    by_contact.entry(child.contact_id).or_default().push(kind, child);
                }
            }
            for contact in &mut contacts {
                contact.children = Some(by_contact.remove(&contact.id).unwrap_or_default());
            }
        }

        Ok(contacts)
    }
}
