use kube::core::DynamicObject;
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::ObjectDescription;
use crate::schema::{Inspection, KeySpec};

#[derive(Debug, Clone, Serialize)]
pub struct ObjectReport {
    #[serde(flatten)]
    pub object: ObjectDescription,
    pub annotations: Vec<Inspection>,
}

/// Reads every document of a YAML (or JSON) stream. Empty documents are
/// skipped.
pub fn read_manifests(input: &str) -> Result<Vec<DynamicObject>, serde_yaml::Error> {
    let mut objects = Vec::new();
    for document in serde_yaml::Deserializer::from_str(input) {
        if let Some(object) = Option::<DynamicObject>::deserialize(document)? {
            objects.push(object);
        }
    }
    Ok(objects)
}

/// Evaluates each key against the object's annotations. Malformed values are
/// logged and reported with their default value.
pub fn inspect_object(object: &DynamicObject, keys: &[KeySpec]) -> ObjectReport {
    let description = ObjectDescription::from(object);
    let annotations = object.annotations();

    let inspections = keys
        .iter()
        .map(|spec| {
            let inspection = spec.evaluate(annotations, &description);
            if let Some(err) = &inspection.error {
                warn!(key = spec.key.as_str(), "{}", err);
            }
            inspection
        })
        .collect::<Vec<_>>();

    debug!(
        "inspected {} {}/{}: {} of {} keys present",
        description.kind,
        description.namespace,
        description.name,
        inspections.iter().filter(|i| i.found).count(),
        inspections.len()
    );

    ObjectReport {
        object: description,
        annotations: inspections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MANIFEST: &str = r#"
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: cafe-ingress
  namespace: default
  annotations:
    nginx.org/hsts: "true"
    nginx.org/hsts-max-age: "2592000"
    nginx.org/listen-ports: "80,,8080"
    nginx.org/proxy-buffer-port: "70000"
---
apiVersion: v1
kind: Service
metadata:
  name: coffee-svc
---
"#;

    fn keys() -> Vec<KeySpec> {
        [
            "nginx.org/hsts=bool",
            "nginx.org/hsts-max-age=integer",
            "nginx.org/listen-ports=strings",
            "nginx.org/proxy-buffer-port=uint16",
        ]
        .iter()
        .map(|raw| raw.parse().unwrap())
        .collect()
    }

    #[test]
    fn test_read_manifests() {
        let objects = read_manifests(MANIFEST).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name_any(), "cafe-ingress");
        assert_eq!(objects[1].name_any(), "coffee-svc");
    }

    #[test]
    fn test_read_manifests_rejects_garbage() {
        assert!(read_manifests("- just\n- a list\n").is_err());
    }

    #[test]
    fn test_inspect_object() {
        let objects = read_manifests(MANIFEST).unwrap();
        let report = inspect_object(&objects[0], &keys());

        assert_eq!(
            report.object,
            ObjectDescription::new("Ingress", "default", "cafe-ingress")
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["kind"], json!("Ingress"));
        assert_eq!(value["annotations"][0]["value"], json!(true));
        assert_eq!(value["annotations"][1]["value"], json!(2592000));
        assert_eq!(value["annotations"][2]["value"], json!(["80", "", "8080"]));
        assert_eq!(value["annotations"][3]["found"], json!(true));
        assert_eq!(value["annotations"][3]["value"], json!(0));
        assert!(value["annotations"][3]["error"]
            .as_str()
            .unwrap()
            .starts_with("Ingress default/cafe-ingress 'nginx.org/proxy-buffer-port' contains invalid unsigned 16 bit integer: "));
    }

    #[test]
    fn test_inspect_unannotated_object() {
        let objects = read_manifests(MANIFEST).unwrap();
        let report = inspect_object(&objects[1], &keys());

        assert_eq!(report.object.namespace, "");
        assert!(report.annotations.iter().all(|i| !i.found && i.error.is_none()));
        assert_eq!(report.annotations[2].value, json!([]));
    }
}
