use kube::core::DynamicObject;
use kube::{Resource, ResourceExt};
use serde::Serialize;

/// Describes the object an annotation map belongs to. Only used to build
/// diagnostic messages.
pub trait ObjectContext {
    fn kind(&self) -> String;
    fn namespace(&self) -> String;
    fn name(&self) -> String;
}

// Cluster-scoped objects have no namespace and render as "/<name>".
impl<K> ObjectContext for K
where
    K: Resource<DynamicType = ()>,
{
    fn kind(&self) -> String {
        <K as Resource>::kind(&()).to_string()
    }

    fn namespace(&self) -> String {
        ResourceExt::namespace(self).unwrap_or_default()
    }

    fn name(&self) -> String {
        self.name_any()
    }
}

/// An owned kind/namespace/name triple, for objects whose kind is only known
/// at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectDescription {
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ObjectDescription {
    pub fn new(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl From<&DynamicObject> for ObjectDescription {
    fn from(object: &DynamicObject) -> Self {
        Self {
            kind: object
                .types
                .as_ref()
                .map(|types| types.kind.clone())
                .unwrap_or_default(),
            namespace: object.metadata.namespace.clone().unwrap_or_default(),
            name: object.name_any(),
        }
    }
}

impl ObjectContext for ObjectDescription {
    fn kind(&self) -> String {
        self.kind.clone()
    }

    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::Namespace;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube::core::TypeMeta;

    #[test]
    fn test_typed_resource_context() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                namespace: Some("frontend".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ObjectContext::kind(&deployment), "Deployment");
        assert_eq!(ObjectContext::namespace(&deployment), "frontend");
        assert_eq!(ObjectContext::name(&deployment), "web");
    }

    #[test]
    fn test_cluster_scoped_context() {
        let namespace = Namespace {
            metadata: ObjectMeta {
                name: Some("frontend".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ObjectContext::kind(&namespace), "Namespace");
        assert_eq!(ObjectContext::namespace(&namespace), "");
    }

    #[test]
    fn test_dynamic_object_description() {
        let mut object = DynamicObject {
            types: Some(TypeMeta {
                api_version: "networking.k8s.io/v1".to_string(),
                kind: "Ingress".to_string(),
            }),
            metadata: ObjectMeta {
                name: Some("cafe".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            data: serde_json::Value::Null,
        };
        assert_eq!(
            ObjectDescription::from(&object),
            ObjectDescription::new("Ingress", "default", "cafe")
        );

        object.types = None;
        assert_eq!(ObjectDescription::from(&object).kind, "");
    }
}
