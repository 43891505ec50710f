//! Grid member resource implementation

use std::collections::HashSet;
use std::future::Future;

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::mapper::{decode_model, encode_model};
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceWithConfigure, ResourceWithImportState,
    UpdateResourceRequest, UpdateResourceResponse,
};
use tfplug::{
    import_state_passthrough_id, AttributePath, Diagnostics, ObjectMapper, Schema, Value,
};

use super::models::{member_schema, MemberModel};
use crate::api::ApiError;
use crate::NiosProviderData;

#[derive(Default)]
pub struct MemberResource {
    provider_data: Option<NiosProviderData>,
}

impl MemberResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn provider_data(&self, diagnostics: &mut Diagnostics) -> Option<&NiosProviderData> {
        if self.provider_data.is_none() {
            diagnostics.add_error(
                "Provider not configured",
                Some("Provider data was not properly configured"),
            );
        }
        self.provider_data.as_ref()
    }
}

/// The object reference of a member already in state
fn member_ref(model: &MemberModel, diagnostics: &mut Diagnostics) -> Option<String> {
    match &model.r#ref {
        Value::Known(r) if !r.is_empty() => Some(r.clone()),
        _ => {
            diagnostics.add_attribute_error(
                &AttributePath::new("ref"),
                "Missing object reference",
                "The member reference is not set in state",
            );
            None
        }
    }
}

/// Run an API call until it finishes or the request context is cancelled
async fn until_cancelled<T>(
    ctx: &Context,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}

fn lom_user_names(model: &MemberModel) -> HashSet<&str> {
    model
        .lom_users
        .as_known()
        .into_iter()
        .flatten()
        .filter_map(Value::as_known)
        .filter_map(|u| u.name.as_known().map(String::as_str))
        .collect()
}

/// LOM user passwords are write-only. Copy them back by user name from the
/// first source that has one.
fn restore_lom_passwords(state: &mut MemberModel, sources: &[&MemberModel]) {
    let Some(users) = state.lom_users.as_known_mut() else {
        return;
    };

    for user in users.iter_mut().filter_map(Value::as_known_mut) {
        if user.password.is_known() {
            continue;
        }
        let Some(name) = user.name.as_known() else {
            continue;
        };
        let password = sources.iter().find_map(|source| {
            source
                .lom_users
                .as_known()?
                .iter()
                .filter_map(Value::as_known)
                .find(|u| u.name.as_known() == Some(name))
                .and_then(|u| u.password.as_known().cloned())
        });
        if let Some(password) = password {
            user.password = Value::Known(password);
        }
    }
}

#[async_trait]
impl Resource for MemberResource {
    fn type_name(&self) -> &str {
        "nios_grid_member"
    }

    fn schema(&self) -> Schema {
        member_schema()
    }

    async fn create(
        &self,
        ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(provider_data) = self.provider_data(&mut diagnostics) else {
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        let Some(plan) = decode_model::<MemberModel>(&request.planned_state, &mut diagnostics)
        else {
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        let Some(mut wire) = plan.expand(&mut diagnostics) else {
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };
        wire.r#ref = None;

        match until_cancelled(&ctx, provider_data.client.grid().member().create(&wire)).await {
            Ok(created) => {
                let mut state = MemberModel::flatten(&created, &mut diagnostics);
                restore_lom_passwords(&mut state, &[&plan]);
                tracing::info!(reference = ?created.r#ref, "created grid member");

                CreateResourceResponse {
                    new_state: encode_model(&state),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to create member", Some(format!("API error: {}", e)));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(provider_data) = self.provider_data(&mut diagnostics) else {
            return ReadResourceResponse {
                new_state: Some(request.current_state),
                diagnostics,
            };
        };

        let current = decode_model::<MemberModel>(&request.current_state, &mut diagnostics);
        let Some(reference) = current
            .as_ref()
            .and_then(|model| member_ref(model, &mut diagnostics))
        else {
            return ReadResourceResponse {
                new_state: Some(request.current_state),
                diagnostics,
            };
        };

        match until_cancelled(&ctx, provider_data.client.grid().member().get(&reference)).await {
            Ok(member) => {
                let mut state = MemberModel::flatten(&member, &mut diagnostics);
                if let Some(current) = &current {
                    restore_lom_passwords(&mut state, &[current]);
                }

                ReadResourceResponse {
                    new_state: Some(encode_model(&state)),
                    diagnostics,
                }
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(reference = %reference, "grid member no longer exists, removing from state");
                ReadResourceResponse {
                    new_state: None,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to read member", Some(format!("API error: {}", e)));
                ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                }
            }
        }
    }

    async fn update(
        &self,
        ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(provider_data) = self.provider_data(&mut diagnostics) else {
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let plan = decode_model::<MemberModel>(&request.planned_state, &mut diagnostics);
        let prior = decode_model::<MemberModel>(&request.prior_state, &mut diagnostics);
        let (Some(plan), Some(prior)) = (plan, prior) else {
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let Some(reference) = member_ref(&prior, &mut diagnostics) else {
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let Some(mut wire) = plan.expand(&mut diagnostics) else {
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };
        wire.r#ref = None;
        // The API refuses password changes on existing LOM users. Users new
        // in this plan still need theirs.
        if let Some(users) = wire.lom_users.as_mut() {
            let existing = lom_user_names(&prior);
            for user in users
                .iter_mut()
                .filter(|u| u.name.as_deref().is_some_and(|n| existing.contains(n)))
            {
                user.password = None;
            }
        }

        match until_cancelled(
            &ctx,
            provider_data.client.grid().member().update(&reference, &wire),
        )
        .await
        {
            Ok(updated) => {
                let mut state = MemberModel::flatten(&updated, &mut diagnostics);
                restore_lom_passwords(&mut state, &[&plan, &prior]);

                UpdateResourceResponse {
                    new_state: encode_model(&state),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to update member", Some(format!("API error: {}", e)));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    async fn delete(
        &self,
        ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(provider_data) = self.provider_data(&mut diagnostics) else {
            return DeleteResourceResponse { diagnostics };
        };

        let Some(reference) = decode_model::<MemberModel>(&request.prior_state, &mut diagnostics)
            .and_then(|prior| member_ref(&prior, &mut diagnostics))
        else {
            return DeleteResourceResponse { diagnostics };
        };

        match until_cancelled(&ctx, provider_data.client.grid().member().delete(&reference)).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!(reference = %reference, "grid member already deleted");
            }
            Err(e) => {
                diagnostics.add_error("Failed to delete member", Some(format!("API error: {}", e)));
            }
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithConfigure for MemberResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let mut diagnostics = Diagnostics::new();

        match request.provider_data {
            Some(data) => match data.downcast_ref::<NiosProviderData>() {
                Some(provider_data) => self.provider_data = Some(provider_data.clone()),
                None => diagnostics.add_error(
                    "Invalid provider data",
                    Some("Failed to extract NiosProviderData from provider data"),
                ),
            },
            None => diagnostics.add_error(
                "No provider data",
                Some("No provider data was provided to the resource"),
            ),
        }

        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for MemberResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: Diagnostics::new(),
        };
        import_state_passthrough_id(&ctx, AttributePath::new("ref"), &request, &mut response);
        response
    }
}

#[cfg(test)]
#[path = "./resource_member_test.rs"]
mod resource_member_test;
