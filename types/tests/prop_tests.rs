use proptest::prelude::*;

use soulbound_types::{Confidence, Photo, StudentRecord, Timestamp, WalletAddress};

fn record_with(photo: &[u8], id_photo: &[u8], name: &str, millis: i64) -> StudentRecord {
    StudentRecord::pending(
        name.to_string(),
        "College".to_string(),
        "Department".to_string(),
        Photo::from_bytes("image/jpeg", photo),
        Photo::from_bytes("image/png", id_photo),
        WalletAddress::parse("PROPWALLET").unwrap(),
        Timestamp::from_millis(millis),
    )
}

proptest! {
    /// A record written as JSON and read back reproduces every field,
    /// including the image payloads byte-for-byte.
    #[test]
    fn record_json_roundtrip_preserves_images(
        photo in prop::collection::vec(any::<u8>(), 0..512),
        id_photo in prop::collection::vec(any::<u8>(), 1..512),
        name in "[A-Za-z ]{1,40}",
        millis in 0i64..4_102_444_800_000,
    ) {
        let original = record_with(&photo, &id_photo, &name, millis);
        let json = serde_json::to_string(&original).unwrap();
        let decoded: StudentRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&decoded, &original);
        prop_assert_eq!(decoded.photo.as_str(), original.photo.as_str());
        prop_assert_eq!(decoded.id_photo.decode().unwrap(), id_photo);
    }

    /// Applying any comparison leaves the record internally consistent, and
    /// the verified flag agrees with the threshold.
    #[test]
    fn comparison_always_yields_valid_record(score in 0.0f64..=100.0) {
        let mut record = record_with(b"face", b"card", "Student", 0);
        let confidence = Confidence::new(score).unwrap();
        record.apply_comparison(confidence, false, Timestamp::from_millis(1));
        prop_assert!(record.validate().is_ok());
        prop_assert_eq!(record.verified, score > 80.0);
    }
}
