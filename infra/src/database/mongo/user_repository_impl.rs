//! MongoDB implementation of the UserRepository trait.
//!
//! Email verification and password reset each touch the `user` and `mail`
//! collections inside one multi-document transaction. For a password reset
//! the revocation cache write runs on its own task while the document writes
//! proceed and is awaited before commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::{ClientSession, Collection};
use tracing::{debug, error, info, warn};

use sl_core::domain::entities::{TokenPair, User};
use sl_core::errors::{AuthError, DomainError};
use sl_core::repositories::{PasswordResetWrite, RevocationWrite, UserRepository};

use super::is_duplicate_key;
use crate::database::connection::{MongoConnection, MAIL_COLLECTION, USER_COLLECTION};
use crate::database::documents::{to_bson, MailDocument, UserDocument};
use crate::timeout::with_timeout;

/// MongoDB implementation of UserRepository
pub struct MongoUserRepository {
    connection: MongoConnection,
    users: Collection<UserDocument>,
    mails: Collection<MailDocument>,
}

impl MongoUserRepository {
    pub fn new(connection: MongoConnection) -> Self {
        Self {
            users: connection.collection(USER_COLLECTION),
            mails: connection.collection(MAIL_COLLECTION),
            connection,
        }
    }

    async fn begin(&self) -> Result<ClientSession, DomainError> {
        let timeout = self.connection.timeout();
        let mut session = with_timeout(
            timeout,
            "session.start",
            self.connection.client().start_session(None),
        )
        .await?;
        with_timeout(
            timeout,
            "session.start_transaction",
            session.start_transaction(None),
        )
        .await?;
        Ok(session)
    }

    async fn commit(&self, session: &mut ClientSession) -> Result<(), DomainError> {
        with_timeout(
            self.connection.timeout(),
            "session.commit_transaction",
            session.commit_transaction(),
        )
        .await?;
        Ok(())
    }

    async fn abort(&self, session: &mut ClientSession) {
        if let Err(e) = with_timeout(
            self.connection.timeout(),
            "session.abort_transaction",
            session.abort_transaction(),
        )
        .await
        {
            warn!("Failed to abort transaction: {}", e);
        }
    }

    async fn verify_in_session(
        &self,
        session: &mut ClientSession,
        user_id: &str,
        mail_id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let timeout = self.connection.timeout();
        let updated = with_timeout(
            timeout,
            "user.update_one",
            self.users.update_one_with_session(
                doc! { "user_id": user_id },
                doc! { "$set": { "is_email_verified": true, "updated_at": to_bson(updated_at) } },
                None,
                session,
            ),
        )
        .await?;
        if updated.matched_count == 0 {
            return Err(DomainError::not_found("user"));
        }

        with_timeout(
            timeout,
            "mail.delete_one",
            self.mails
                .delete_one_with_session(doc! { "mail_id": mail_id }, None, session),
        )
        .await?;
        Ok(())
    }

    async fn reset_in_session(
        &self,
        session: &mut ClientSession,
        reset: &PasswordResetWrite,
    ) -> Result<(), DomainError> {
        let timeout = self.connection.timeout();
        let updated = with_timeout(
            timeout,
            "user.update_one",
            self.users.update_one_with_session(
                doc! { "email": reset.email.as_str() },
                doc! { "$set": {
                    "password": reset.password_hash.as_str(),
                    "updated_at": to_bson(reset.updated_at),
                } },
                None,
                session,
            ),
        )
        .await?;
        if updated.matched_count == 0 {
            return Err(DomainError::not_found("user"));
        }

        with_timeout(
            timeout,
            "mail.delete_one",
            self.mails
                .delete_one_with_session(doc! { "mail_id": reset.mail_id.as_str() }, None, session),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn count_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let count = with_timeout(
            self.connection.timeout(),
            "user.count_documents",
            self.users.count_documents(doc! { "email": email }, None),
        )
        .await?;
        Ok(count)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = with_timeout(
            self.connection.timeout(),
            "user.find_one",
            self.users.find_one(doc! { "email": email }, None),
        )
        .await?;
        Ok(found.map(User::try_from).transpose()?)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let found = with_timeout(
            self.connection.timeout(),
            "user.find_one",
            self.users.find_one(doc! { "user_id": user_id }, None),
        )
        .await?;
        Ok(found.map(User::try_from).transpose()?)
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        let document = UserDocument::from(&user);
        match with_timeout(
            self.connection.timeout(),
            "user.insert_one",
            self.users.insert_one(document, None),
        )
        .await
        {
            Ok(_) => {
                info!("Inserted user {}", user.user_id);
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(AuthError::UserAlreadyExists.into()),
            Err(e) => {
                error!("Failed to insert user {}: {}", user.user_id, e);
                Err(e.into())
            }
        }
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        pair: &TokenPair,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let options = UpdateOptions::builder().upsert(true).build();
        with_timeout(
            self.connection.timeout(),
            "user.update_one",
            self.users.update_one(
                doc! { "user_id": user_id },
                doc! { "$set": {
                    "access_token": pair.access_token.as_str(),
                    "refresh_token": pair.refresh_token.as_str(),
                    "updated_at": to_bson(updated_at),
                } },
                options,
            ),
        )
        .await?;
        debug!("Stored token pair for user {}", user_id);
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        user_id: &str,
        mail_id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut session = self.begin().await?;
        match self
            .verify_in_session(&mut session, user_id, mail_id, updated_at)
            .await
        {
            Ok(()) => {
                self.commit(&mut session).await?;
                info!("Verified email of user {}", user_id);
                Ok(())
            }
            Err(e) => {
                self.abort(&mut session).await;
                Err(e)
            }
        }
    }

    async fn reset_password(
        &self,
        reset: PasswordResetWrite,
        revoke: RevocationWrite,
    ) -> Result<(), DomainError> {
        let mut session = self.begin().await?;
        let revocation = tokio::spawn(revoke);

        let written = self.reset_in_session(&mut session, &reset).await;
        let revoked = match revocation.await {
            Ok(result) => result,
            Err(e) => Err(DomainError::internal(format!("revocation task failed: {}", e))),
        };

        match (written, revoked) {
            (Ok(()), Ok(())) => {
                self.commit(&mut session).await?;
                info!("Password reset committed");
                Ok(())
            }
            (Err(e), _) | (Ok(()), Err(e)) => {
                error!("Password reset aborted: {}", e);
                self.abort(&mut session).await;
                Err(e)
            }
        }
    }
}
