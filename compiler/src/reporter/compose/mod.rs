use std::collections::{BTreeMap, HashSet};

use serde::{Serialize, ser::SerializeMap as _};
use strata_model::{ComponentName, Role};

use crate::{
    CompileOutput,
    reporter::{Reporter, ReporterError},
};

const COMPOSE_VERSION: &str = "3.9";
const DEFAULT_NETWORK: &str = "default";
const INIT_SQL_MOUNT: &str = "/docker-entrypoint-initdb.d/init.sql";
const DOCUMENT_STORE_COMMAND: &str = "-jar DynamoDBLocal.jar -sharedDb";
const MYSQL_CONTAINER_PORT: u16 = 3306;
const DYNAMO_CONTAINER_PORT: u16 = 8000;

/// Emits the compiled topology as a Docker Compose document. Services appear
/// in topology order, so every `depends_on` edge points at an earlier entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComposeReporter;

impl Reporter for ComposeReporter {
    type Artifact = String;

    fn emit(&self, output: &CompileOutput) -> Result<Self::Artifact, ReporterError> {
        let compose = build_compose(output)?;
        serde_yaml::to_string(&compose)
            .map_err(|err| ReporterError::new(format!("failed to serialize compose yaml: {err}")))
    }
}

#[derive(Clone, Debug, Default, Serialize)]
struct ComposeFile {
    version: String,
    services: ServiceMap,
    networks: BTreeMap<String, Network>,
}

/// Compose service map that serializes in insertion order. A `BTreeMap`
/// would re-sort services alphabetically and lose the infra-first layout.
#[derive(Clone, Debug, Default)]
struct ServiceMap(Vec<(ComponentName, Service)>);

impl ServiceMap {
    fn insert(&mut self, name: ComponentName, service: Service) {
        self.0.push((name, service));
    }
}

impl Serialize for ServiceMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, service) in &self.0 {
            map.serialize_entry(name.as_str(), service)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, Default, Serialize)]
struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    environment: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

impl Service {
    fn from_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Default::default()
        }
    }

    fn from_build(context: impl Into<String>) -> Self {
        Self {
            build: Some(context.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
struct Network {
    driver: String,
}

fn build_compose(output: &CompileOutput) -> Result<ComposeFile, ReporterError> {
    let config = &output.config;
    let mut compose = ComposeFile {
        version: COMPOSE_VERSION.to_string(),
        ..Default::default()
    };

    // Host ports the infra entries publish are off limits for the Tier-1
    // counter; with the default config the document store sits right on
    // `base_port`.
    let mut reserved: HashSet<u16> = HashSet::new();
    for (_, role) in output.classification.entries() {
        match role {
            Role::Database => {
                reserved.insert(config.relational_port);
            }
            Role::Nosql => {
                reserved.insert(config.document_port);
            }
            Role::Backend | Role::Frontend | Role::Other(_) => {}
        }
    }

    // One pass over the topology order; the counter advances only for Tier-1
    // services, infra keeps its well-known ports.
    let mut next_port = config.base_port;
    let mut allocate = |name: &ComponentName| -> Result<u16, ReporterError> {
        while reserved.contains(&next_port) {
            next_port = next_port.checked_add(1).ok_or_else(|| {
                ReporterError::new(format!("ran out of host ports allocating for `{name}`"))
            })?;
        }
        let port = next_port;
        next_port = next_port.checked_add(1).ok_or_else(|| {
            ReporterError::new(format!("ran out of host ports allocating for `{name}`"))
        })?;
        Ok(port)
    };

    for name in &output.order {
        let role = output.classification.role(name).ok_or_else(|| {
            ReporterError::new(format!("internal error: unclassified component `{name}`"))
        })?;

        let service = match role {
            Role::Database => {
                let mut service = Service::from_image(&config.relational_image);
                service.environment = vec![
                    format!("MYSQL_ROOT_PASSWORD={}", config.root_password),
                    format!("MYSQL_DATABASE={name}"),
                ];
                service.volumes = vec![format!("./{name}/init.sql:{INIT_SQL_MOUNT}")];
                service.ports = vec![format!(
                    "{}:{MYSQL_CONTAINER_PORT}",
                    config.relational_port
                )];
                service
            }
            Role::Nosql => {
                let mut service = Service::from_image(&config.document_image);
                service.command = Some(DOCUMENT_STORE_COMMAND.to_string());
                // DynamoDB Local always listens on 8000 inside the container;
                // only the host side is configurable.
                service.ports = vec![format!(
                    "{}:{DYNAMO_CONTAINER_PORT}",
                    config.document_port
                )];
                service.volumes = vec![format!("./{name}:/data")];
                service
            }
            Role::Backend => {
                let mut service = Service::from_build(format!("./{name}"));
                service.ports = vec![format!("{}:{}", allocate(name)?, config.service_port)];
                let refs = output.refs.get(name);
                service.depends_on = [refs.database, refs.document_store]
                    .into_iter()
                    .flatten()
                    .map(String::from)
                    .collect();
                service
            }
            // Frontends call their backend at runtime but historically start
            // without a depends_on edge; the manifest keeps that shape.
            // TODO: decide whether frontends should depend on their backend.
            Role::Frontend | Role::Other(_) => {
                let mut service = Service::from_build(format!("./{name}"));
                service.ports = vec![format!("{}:{}", allocate(name)?, config.service_port)];
                service
            }
        };

        compose.services.insert(name.clone(), service);
    }

    compose.networks.insert(
        DEFAULT_NETWORK.to_string(),
        Network {
            driver: "bridge".to_string(),
        },
    );

    Ok(compose)
}
