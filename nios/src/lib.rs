//! Infoblox NIOS provider
//!
//! Holds the WAPI client, the grid member wire and state models, and the
//! `nios_grid_member` resource. Serving the plugin protocol is left to the
//! host that embeds this crate.

pub mod api;
pub mod provider_data;
pub mod resources;

pub use provider_data::NiosProviderData;

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tfplug::defaults::StaticDefault;
use tfplug::resource::{ConfigureResourceRequest, Resource, ResourceWithConfigure};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::{AttributePath, Context, Diagnostics, DynamicValue, TfplugError};

pub const DEFAULT_WAPI_VERSION: &str = "v2.13.6";

/// Install a stderr `tracing` subscriber. The level comes from `TF_LOG`
/// and defaults to INFO.
pub fn init_tracing() {
    let level = std::env::var("TF_LOG")
        .ok()
        .and_then(|v| v.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub struct NiosProvider {
    provider_data: Option<NiosProviderData>,
}

impl Default for NiosProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NiosProvider {
    pub fn new() -> Self {
        Self {
            provider_data: None,
        }
    }

    pub fn type_name(&self) -> &str {
        "nios"
    }

    pub fn provider_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Terraform provider for Infoblox NIOS")
            .attribute(
                AttributeBuilder::new("nios_host_url", AttributeType::String)
                    .description("NIOS Grid Master URL, e.g. https://gm.example.com")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("nios_username", AttributeType::String)
                    .description("NIOS API username")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("nios_password", AttributeType::String)
                    .description("NIOS API password")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("wapi_version", AttributeType::String)
                    .description("WAPI version, e.g. v2.13.6")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("insecure", AttributeType::Bool)
                    .description("Skip TLS certificate verification")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(false))
                    .build(),
            )
            .build()
    }

    /// Resolve credentials from the provider block, falling back to the
    /// `NIOS_*` environment variables, and build the shared client.
    pub async fn configure(&mut self, _ctx: Context, config: &DynamicValue) -> Diagnostics {
        let string_setting = |name: &str, env: &str| {
            config
                .get_string(&AttributePath::new(name))
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| std::env::var(env).ok().filter(|v| !v.is_empty()))
        };

        let host_url = string_setting("nios_host_url", "NIOS_HOST_URL");
        let username = string_setting("nios_username", "NIOS_USERNAME");
        let password = string_setting("nios_password", "NIOS_PASSWORD");
        let wapi_version = string_setting("wapi_version", "NIOS_WAPI_VERSION")
            .unwrap_or_else(|| DEFAULT_WAPI_VERSION.to_string());

        let insecure = config
            .get_bool(&AttributePath::new("insecure"))
            .ok()
            .or_else(|| {
                std::env::var("NIOS_INSECURE")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok())
            })
            .unwrap_or(false);

        let mut diags = Diagnostics::new();

        match (host_url, username, password) {
            (Some(host_url), Some(username), Some(password)) => {
                match api::Client::new(&host_url, &wapi_version, &username, &password, insecure) {
                    Ok(client) => {
                        tracing::debug!(%host_url, %wapi_version, insecure, "configured NIOS client");
                        self.provider_data = Some(NiosProviderData::new(client));
                    }
                    Err(e) => {
                        diags.add_error(format!("Failed to create API client: {}", e), None::<String>);
                    }
                }
            }
            (None, _, _) => {
                diags.add_error(
                    "nios_host_url is required (set in provider config or NIOS_HOST_URL env var)",
                    None::<String>,
                );
            }
            (_, None, _) => {
                diags.add_error(
                    "nios_username is required (set in provider config or NIOS_USERNAME env var)",
                    None::<String>,
                );
            }
            (_, _, None) => {
                diags.add_error(
                    "nios_password is required (set in provider config or NIOS_PASSWORD env var)",
                    None::<String>,
                );
            }
        }

        diags
    }

    /// Schemas for every resource type, built on each call
    pub fn resource_schemas() -> HashMap<String, Schema> {
        let mut schemas = HashMap::new();
        let member = resources::MemberResource::new();
        schemas.insert(member.type_name().to_string(), member.schema());
        schemas
    }

    /// Build a configured resource instance by type name
    pub async fn create_resource(
        &self,
        ctx: Context,
        name: &str,
    ) -> tfplug::Result<Box<dyn Resource>> {
        let provider_data = self
            .provider_data
            .clone()
            .ok_or(TfplugError::ProviderNotConfigured)?;
        let data: Arc<dyn Any + Send + Sync> = Arc::new(provider_data);

        match name {
            "nios_grid_member" => {
                let mut resource = resources::MemberResource::new();
                let response = resource
                    .configure(
                        ctx,
                        ConfigureResourceRequest {
                            provider_data: Some(data),
                        },
                    )
                    .await;
                if let Some(error) = response.diagnostics.errors.first() {
                    return Err(TfplugError::InvalidConfiguration(error.summary.clone()));
                }
                Ok(Box::new(resource))
            }
            _ => Err(TfplugError::ResourceNotFound(name.to_string())),
        }
    }
}
