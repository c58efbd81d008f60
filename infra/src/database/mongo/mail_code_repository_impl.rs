//! MongoDB implementation of the MailCodeRepository trait.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Collection;
use tracing::debug;

use sl_core::domain::entities::{MailCode, MailType};
use sl_core::errors::DomainError;
use sl_core::repositories::MailCodeRepository;

use crate::database::connection::{MongoConnection, MAIL_COLLECTION};
use crate::database::documents::{to_bson, MailDocument};
use crate::timeout::with_timeout;

/// MongoDB implementation of MailCodeRepository
pub struct MongoMailCodeRepository {
    connection: MongoConnection,
    mails: Collection<MailDocument>,
}

impl MongoMailCodeRepository {
    pub fn new(connection: MongoConnection) -> Self {
        Self {
            mails: connection.collection(MAIL_COLLECTION),
            connection,
        }
    }
}

#[async_trait]
impl MailCodeRepository for MongoMailCodeRepository {
    async fn find(
        &self,
        email: &str,
        mail_type: MailType,
    ) -> Result<Option<MailCode>, DomainError> {
        let found = with_timeout(
            self.connection.timeout(),
            "mail.find_one",
            self.mails
                .find_one(doc! { "email": email, "type": mail_type.as_str() }, None),
        )
        .await?;
        Ok(found.map(MailCode::try_from).transpose()?)
    }

    async fn upsert(&self, code: MailCode) -> Result<MailCode, DomainError> {
        // Equality fields of the filter are copied onto an inserted document
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        let stored = with_timeout(
            self.connection.timeout(),
            "mail.find_one_and_update",
            self.mails.find_one_and_update(
                doc! { "email": code.email.as_str(), "type": code.mail_type.as_str() },
                doc! {
                    "$set": {
                        "code": code.code.as_str(),
                        "updated_at": to_bson(code.updated_at),
                        "expires_at": to_bson(code.expires_at),
                    },
                    "$setOnInsert": {
                        "mail_id": code.mail_id.as_str(),
                        "created_at": to_bson(code.created_at),
                    },
                },
                options,
            ),
        )
        .await?;

        debug!("Stored {} code record", code.mail_type);
        match stored {
            Some(document) => Ok(MailCode::try_from(document)?),
            None => Ok(code),
        }
    }
}
