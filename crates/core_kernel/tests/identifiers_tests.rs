//! Tests for typed identifiers and the exchange identifier generators

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use core_kernel::identifiers::{MEMBER_ID_SEQUENCE, ORGANIZATION_ID_SEQUENCE, POLICY_ID_SEQUENCE};
use core_kernel::{
    identifier_generator, CoreError, CoveragePeriodId, DomainPort, IdentifierGenerator, IdentifierSource,
    MessageId, OrganizationId, PersonId, PortError, RandomIdentifierGenerator,
    SequenceIdentifierGenerator, SequenceService,
};

mod typed_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(PersonId::new(), PersonId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = MessageId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = MessageId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid = Uuid::new_v4();
        let with_prefix: OrganizationId = format!("ORG-{}", uuid).parse().unwrap();
        let bare: OrganizationId = uuid.to_string().parse().unwrap();
        assert_eq!(with_prefix, bare);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("BCP-not-a-uuid".parse::<CoveragePeriodId>().is_err());
    }

    #[test]
    fn test_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = PersonId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

/// Sequence service replaying scripted responses and recording requests
struct ScriptedSequenceService {
    responses: Mutex<VecDeque<Result<u64, PortError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSequenceService {
    fn new(responses: Vec<Result<u64, PortError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl DomainPort for ScriptedSequenceService {}

#[async_trait]
impl SequenceService for ScriptedSequenceService {
    async fn next_value(&self, sequence_name: &str) -> Result<u64, PortError> {
        self.requests.lock().await.push(sequence_name.to_string());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(PortError::ServiceUnavailable { service: "sequence".to_string() }))
    }
}

mod sequence_generator_tests {
    use super::*;

    #[tokio::test]
    async fn test_each_kind_uses_its_sequence() {
        let service = Arc::new(ScriptedSequenceService::new(vec![Ok(1001), Ok(2002), Ok(3003)]));
        let generator = SequenceIdentifierGenerator::new(service.clone());

        assert_eq!(generator.generate_member_id().await.unwrap(), "1001");
        assert_eq!(generator.generate_policy_id().await.unwrap(), "2002");
        assert_eq!(generator.generate_organization_id().await.unwrap(), "3003");

        let requests = service.requests.lock().await.clone();
        assert_eq!(
            requests,
            vec![MEMBER_ID_SEQUENCE, POLICY_ID_SEQUENCE, ORGANIZATION_ID_SEQUENCE]
        );
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let service = Arc::new(ScriptedSequenceService::new(vec![
            Err(PortError::connection("broker timeout")),
            Err(PortError::Timeout { operation: "sequence.next".to_string(), duration_ms: 2000 }),
            Ok(42),
        ]));
        let generator = SequenceIdentifierGenerator::new(service.clone());

        assert_eq!(generator.generate_member_id().await.unwrap(), "42");
        assert_eq!(service.requests.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let service = Arc::new(ScriptedSequenceService::new(vec![
            Err(PortError::connection("down")),
            Err(PortError::connection("down")),
            Err(PortError::connection("still down")),
            Ok(7),
        ]));
        let generator = SequenceIdentifierGenerator::new(service.clone());

        let result = generator.generate_policy_id().await;
        assert!(matches!(result, Err(PortError::Connection { .. })));
        assert_eq!(service.requests.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_permanent_failures() {
        let service = Arc::new(ScriptedSequenceService::new(vec![
            Err(PortError::not_found("Sequence", "member_id")),
            Ok(9),
        ]));
        let generator = SequenceIdentifierGenerator::new(service.clone()).with_max_attempts(5);

        assert!(generator.generate_member_id().await.unwrap_err().is_not_found());
        assert_eq!(service.requests.lock().await.len(), 1);
    }
}

mod random_generator_tests {
    use super::*;

    #[tokio::test]
    async fn test_random_ids_are_unique_hex() {
        let generator = RandomIdentifierGenerator;
        let a = generator.generate_member_id().await.unwrap();
        let b = generator.generate_member_id().await.unwrap();

        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(!a.contains('-'));
    }

    #[tokio::test]
    async fn test_factory_selects_configured_source() {
        let service: Arc<dyn SequenceService> = Arc::new(ScriptedSequenceService::new(vec![Ok(5)]));
        let sequence = identifier_generator(IdentifierSource::Sequence, Some(service)).unwrap();
        assert_eq!(sequence.generate_organization_id().await.unwrap(), "5");

        let random = identifier_generator(IdentifierSource::Random, None).unwrap();
        assert_eq!(random.generate_organization_id().await.unwrap().len(), 32);
    }

    #[test]
    fn test_sequence_source_without_service_is_rejected() {
        assert!(matches!(
            identifier_generator(IdentifierSource::Sequence, None),
            Err(CoreError::Validation(_))
        ));
    }
}
