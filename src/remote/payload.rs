use super::{default_map_config, RemoteError, SourceSnapshot};
use crate::codec::{parse_import, ImportError, ImportPayload};
use regex::Regex;
use std::sync::LazyLock;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("statisches Regex-Pattern")
});

/// Sucht den ```json-Block im Dokument und liest Marker und Config daraus.
///
/// Der Block hat die Form des Export-Dokuments; `config` ist Pflicht.
/// Nicht gesetzte Config-Felder (z.B. `publishBaseUrl`) kommen aus der Standard-Config.
pub fn extract_payload(document: &str) -> Result<SourceSnapshot, RemoteError> {
    let block = JSON_FENCE
        .captures(document)
        .and_then(|c| c.get(1))
        .ok_or(RemoteError::MissingDataBlock)?
        .as_str();

    let payload = parse_import(block).map_err(|e| match e {
        ImportError::Malformed(msg) => RemoteError::InvalidPayload(msg),
        ImportError::UnrecognizedShape => {
            RemoteError::InvalidPayload("unbekannte Struktur".to_string())
        }
    })?;

    match payload {
        ImportPayload::Full {
            config: Some(patch),
            markers,
        } => {
            let mut config = default_map_config();
            config.merge(&patch);
            Ok(SourceSnapshot { markers, config })
        }
        _ => Err(RemoteError::InvalidPayload("config fehlt".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"Atlas data (do not edit below)
```json
{
  "config": {
    "imageWidth": 8000,
    "imageHeight": 5000,
    "currentLocation": { "name": "Greywater", "x": 400, "y": 300, "zoom": 1.0 }
  },
  "markers": [
    { "id": "1", "name": "Greywater", "type": "city", "x": 400, "y": 300 }
  ]
}
```
trailing text"#;

    #[test]
    fn extracts_fenced_block() {
        let snapshot = extract_payload(DOC).expect("Block vorhanden");
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.config.image_width, 8000);
        assert_eq!(snapshot.config.current_location.name, "Greywater");
        assert_eq!(
            snapshot.config.publish_base_url,
            default_map_config().publish_base_url
        );
    }

    #[test]
    fn missing_block_is_reported() {
        assert!(matches!(
            extract_payload("just prose, no data"),
            Err(RemoteError::MissingDataBlock)
        ));
    }

    #[test]
    fn broken_block_is_invalid() {
        let doc = "```json\n{ \"config\": \n```";
        assert!(matches!(
            extract_payload(doc),
            Err(RemoteError::InvalidPayload(_))
        ));
    }

    #[test]
    fn block_without_config_is_invalid() {
        let doc = "```json\n[{\"id\":\"1\",\"name\":\"A\",\"type\":\"town\",\"x\":1,\"y\":1}]\n```";
        assert!(matches!(
            extract_payload(doc),
            Err(RemoteError::InvalidPayload(_))
        ));
    }
}
