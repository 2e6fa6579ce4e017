//! Shared test utilities for cn-db unit tests.

pub(crate) mod helpers {
    use chrono::NaiveDate;
    use cn_core::entities::Client;
    use cn_core::payloads::NewClient;

    use crate::CasenoteDb;
    use crate::service::PracticeService;

    /// Create an in-memory `PracticeService`.
    pub async fn test_service() -> PracticeService {
        let db = CasenoteDb::open_local(":memory:").await.unwrap();
        PracticeService::from_db(db)
    }

    /// Create a client with just a name (convenience for tests that need an owner).
    pub async fn create_test_client(svc: &PracticeService, first: &str, last: &str) -> Client {
        svc.create_client(NewClient::new(first, last)).await.unwrap()
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }
}
