//! Unit tests for the request identifier

use core_kernel::RequestId;
use uuid::Uuid;

mod request_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = RequestId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = RequestId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = RequestId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(RequestId::prefix(), "REQ");
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = RequestId::new();
        let parsed: RequestId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        // x-request-id headers carry bare UUIDs
        let uuid = Uuid::new_v4();
        let parsed: RequestId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("REQ-not-a-uuid".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = RequestId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
