//! Fetch Certificate Use Case

use std::sync::Arc;

use kernel::id::{CertificateId, UserId};

use crate::domain::entities::Certificate;
use crate::domain::repository::CertificateRepository;
use crate::error::{LmsError, LmsResult};

/// Fetch certificate use case
pub struct FetchCertificateUseCase<R>
where
    R: CertificateRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> FetchCertificateUseCase<R>
where
    R: CertificateRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a certificate the caller owns
    ///
    /// Someone else's certificate reads as missing, same as a bad ID.
    pub async fn execute(
        &self,
        user_id: &UserId,
        certificate_id: &CertificateId,
    ) -> LmsResult<Certificate> {
        let certificate = self
            .repo
            .find_certificate(certificate_id)
            .await?
            .ok_or(LmsError::CertificateNotFound)?;

        if certificate.user_id != *user_id {
            return Err(LmsError::CertificateNotFound);
        }

        Ok(certificate)
    }
}
