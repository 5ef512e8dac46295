//! Application command resource implementation

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

use crate::api::commands::{Command, CreateCommand, PatchCommand};
use crate::api::expect_status;
use tfkit::context::Context;
use tfkit::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse, ImportedResource,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceMetadataRequest, ResourceMetadataResponse,
    ResourceSchemaRequest, ResourceSchemaResponse, ResourceWithConfigure,
    ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfkit::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfkit::types::{AttributePath, Diagnostic, DynamicValue};

/// Command type codes the remote service accepts:
/// 1 chat input, 2 user, 3 message, 4 primary entry point.
const VALID_COMMAND_TYPES: [i64; 4] = [1, 2, 3, 4];

#[derive(Default)]
pub struct CommandResource {
    provider_data: Option<crate::DiscordProviderData>,
}

impl CommandResource {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Typed mirror of the resource's attribute record. All movement between
/// dynamic plan/state data and the struct happens through the explicit
/// mapping functions below, so shape errors surface at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandModel {
    pub application_id: String,
    pub command_id: String,
    pub name: String,
    pub description: String,
    pub command_type: i64,
    pub last_updated: String,
}

impl CommandModel {
    /// Extract the author-supplied attributes from a plan. Computed fields
    /// may be absent or unknown at this point and default to empty.
    pub fn from_plan(plan: &DynamicValue) -> Result<Self, Diagnostic> {
        let application_id = plan
            .get_string(&AttributePath::new("application_id"))
            .map_err(|_| {
                Diagnostic::error(
                    "Missing application_id",
                    "The 'application_id' attribute is required",
                )
            })?;

        let name = plan.get_string(&AttributePath::new("name")).map_err(|_| {
            Diagnostic::error("Missing name", "The 'name' attribute is required")
        })?;

        let description = plan
            .get_string(&AttributePath::new("description"))
            .map_err(|_| {
                Diagnostic::error(
                    "Missing description",
                    "The 'description' attribute is required",
                )
            })?;

        let command_type = plan
            .get_number(&AttributePath::new("type"))
            .map_err(|_| Diagnostic::error("Missing type", "The 'type' attribute is required"))?
            as i64;

        Ok(Self {
            application_id,
            command_id: plan
                .get_string(&AttributePath::new("command_id"))
                .unwrap_or_default(),
            name,
            description,
            command_type,
            last_updated: plan
                .get_string(&AttributePath::new("last_updated"))
                .unwrap_or_default(),
        })
    }

    /// Extract the identifying pair from stored state. Mutable attributes are
    /// tolerated missing (an imported state carries only the identifiers);
    /// a following read refreshes them from the remote service.
    pub fn from_state(state: &DynamicValue) -> Result<Self, Diagnostic> {
        let application_id = state
            .get_string(&AttributePath::new("application_id"))
            .map_err(|_| {
                Diagnostic::error(
                    "Invalid resource state",
                    "State is missing the 'application_id' attribute",
                )
            })?;

        let command_id = state
            .get_string(&AttributePath::new("command_id"))
            .map_err(|_| {
                Diagnostic::error(
                    "Invalid resource state",
                    "State is missing the 'command_id' attribute",
                )
            })?;

        Ok(Self {
            application_id,
            command_id,
            name: state
                .get_string(&AttributePath::new("name"))
                .unwrap_or_default(),
            description: state
                .get_string(&AttributePath::new("description"))
                .unwrap_or_default(),
            command_type: state
                .get_number(&AttributePath::new("type"))
                .unwrap_or(1.0) as i64,
            last_updated: state
                .get_string(&AttributePath::new("last_updated"))
                .unwrap_or_default(),
        })
    }

    /// Overwrite the mutable attributes from a remote response and stamp
    /// last_updated with the current time.
    pub fn refresh_from(&mut self, command: &Command) {
        if !command.application_id.is_empty() {
            self.application_id = command.application_id.clone();
        }
        self.command_id = command.id.clone();
        self.name = command.name.clone();
        self.description = command.description.clone();
        self.command_type = command.command_type;
        self.last_updated = Utc::now().to_rfc3339();
    }

    /// Build the observed-state record persisted after a successful write.
    pub fn to_state(&self) -> DynamicValue {
        let mut state = DynamicValue::empty_map();
        let _ = state.set_string(
            &AttributePath::new("application_id"),
            self.application_id.clone(),
        );
        let _ = state.set_string(&AttributePath::new("command_id"), self.command_id.clone());
        let _ = state.set_string(&AttributePath::new("name"), self.name.clone());
        let _ = state.set_string(
            &AttributePath::new("description"),
            self.description.clone(),
        );
        let _ = state.set_number(&AttributePath::new("type"), self.command_type as f64);
        let _ = state.set_string(
            &AttributePath::new("last_updated"),
            self.last_updated.clone(),
        );
        state
    }
}

/// Split an import identifier of the form `{application_id}-{command_id}`.
/// Anything that does not split into exactly two non-empty segments is
/// rejected instead of indexed blindly.
pub fn parse_import_id(id: &str) -> Result<(String, String), Diagnostic> {
    let segments: Vec<&str> = id.split('-').collect();

    if segments.len() != 2 || segments[0].is_empty() || segments[1].is_empty() {
        return Err(Diagnostic::error(
            "Invalid import ID",
            format!(
                "Expected an import ID of the form '{{application_id}}-{{command_id}}', got: '{}'",
                id
            ),
        ));
    }

    Ok((segments[0].to_string(), segments[1].to_string()))
}

#[async_trait]
impl Resource for CommandResource {
    fn type_name(&self) -> &str {
        "discord-application_command"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse {
        ResourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        let schema = SchemaBuilder::new()
            .version(0)
            .description("Discord application command")
            .attribute(
                AttributeBuilder::new("application_id", AttributeType::String)
                    .description("The application ID that the command belongs to")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("command_id", AttributeType::String)
                    .description("The ID of the command")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description(
                        "The name of the command - matches the command a user would type in discord",
                    )
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("description", AttributeType::String)
                    .description("The description of the command - displayed in discord")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("type", AttributeType::Number)
                    .description(
                        "The type of command - see discord application API documentation for more info",
                    )
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("last_updated", AttributeType::String)
                    .description("The last time the command was updated")
                    .computed()
                    .build(),
            )
            .build();

        ResourceSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        let mut diagnostics = vec![];

        if let Ok(command_type) = request.config.get_number(&AttributePath::new("type")) {
            if !VALID_COMMAND_TYPES.contains(&(command_type as i64)) {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid command type",
                        format!(
                            "Command type must be one of {:?} (chat input, user, message, primary entry point)",
                            VALID_COMMAND_TYPES
                        ),
                    )
                    .with_attribute(AttributePath::new("type")),
                );
            }
        }

        if let Ok(name) = request.config.get_string(&AttributePath::new("name")) {
            if name.is_empty() || name.chars().count() > 32 {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid command name",
                        "Command names must be between 1 and 32 characters",
                    )
                    .with_attribute(AttributePath::new("name")),
                );
            }
        }

        if let Ok(description) = request
            .config
            .get_string(&AttributePath::new("description"))
        {
            if description.is_empty() || description.chars().count() > 100 {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid command description",
                        "Command descriptions must be between 1 and 100 characters",
                    )
                    .with_attribute(AttributePath::new("description")),
                );
            }
        }

        ValidateResourceConfigResponse { diagnostics }
    }

    async fn create(
        &self,
        ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    private: vec![],
                    diagnostics,
                };
            }
        };

        let mut model = match CommandModel::from_plan(&request.planned_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    private: vec![],
                    diagnostics,
                };
            }
        };

        let create_request = CreateCommand {
            name: model.name.clone(),
            description: model.description.clone(),
            command_type: Some(model.command_type),
            ..Default::default()
        };

        let command = match provider_data
            .commands
            .create(&ctx, &model.application_id, &create_request)
            .await
        {
            Ok(response) => {
                if let Err(e) =
                    expect_status(response.status, &[StatusCode::OK, StatusCode::CREATED])
                {
                    diagnostics.push(Diagnostic::error(
                        "Error creating command",
                        format!("Could not create command: {}", e),
                    ));
                    return CreateResourceResponse {
                        new_state: request.planned_state,
                        private: vec![],
                        diagnostics,
                    };
                }
                match response.value {
                    Some(command) => command,
                    None => {
                        diagnostics.push(Diagnostic::error(
                            "Error creating command",
                            "The service accepted the command but returned no body",
                        ));
                        return CreateResourceResponse {
                            new_state: request.planned_state,
                            private: vec![],
                            diagnostics,
                        };
                    }
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error creating command",
                    format!("Could not create command, unexpected error: {}", e),
                ));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    private: vec![],
                    diagnostics,
                };
            }
        };

        model.refresh_from(&command);

        CreateResourceResponse {
            new_state: model.to_state(),
            private: vec![],
            diagnostics,
        }
    }

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                    private: request.private,
                };
            }
        };

        let mut model = match CommandModel::from_state(&request.current_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                    private: request.private,
                };
            }
        };

        match provider_data
            .commands
            .get(&ctx, &model.application_id, &model.command_id)
            .await
        {
            Ok(response) => {
                if let Err(e) = expect_status(response.status, &[StatusCode::OK]) {
                    diagnostics.push(Diagnostic::error(
                        "Error Reading Discord Application Command",
                        format!(
                            "Could not read Discord Application Command | ID: {} | Application ID: {}: {}",
                            model.command_id, model.application_id, e
                        ),
                    ));
                    return ReadResourceResponse {
                        new_state: Some(request.current_state),
                        diagnostics,
                        private: request.private,
                    };
                }

                match response.value {
                    Some(command) => {
                        model.refresh_from(&command);
                        ReadResourceResponse {
                            new_state: Some(model.to_state()),
                            diagnostics,
                            private: request.private,
                        }
                    }
                    None => {
                        diagnostics.push(Diagnostic::error(
                            "Error Reading Discord Application Command",
                            format!(
                                "Could not read Discord Application Command | ID: {} | Application ID: {}: empty response body",
                                model.command_id, model.application_id
                            ),
                        ));
                        ReadResourceResponse {
                            new_state: Some(request.current_state),
                            diagnostics,
                            private: request.private,
                        }
                    }
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error Reading Discord Application Command",
                    format!(
                        "Could not read Discord Application Command | ID: {} | Application ID: {} | Error: {}",
                        model.command_id, model.application_id, e
                    ),
                ));
                ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                    private: request.private,
                }
            }
        }
    }

    async fn update(
        &self,
        ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    private: vec![],
                    diagnostics,
                };
            }
        };

        let state = match CommandModel::from_state(&request.prior_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    private: vec![],
                    diagnostics,
                };
            }
        };

        let mut plan = match CommandModel::from_plan(&request.planned_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    private: vec![],
                    diagnostics,
                };
            }
        };

        // Only name and description are patchable; type and application_id
        // changes require replacement.
        let patch_request = PatchCommand {
            name: Some(plan.name.clone()),
            description: Some(plan.description.clone()),
            ..Default::default()
        };

        match provider_data
            .commands
            .patch(&ctx, &plan.application_id, &state.command_id, &patch_request)
            .await
        {
            Ok(response) => {
                if let Err(e) = expect_status(response.status, &[StatusCode::OK]) {
                    diagnostics.push(Diagnostic::error(
                        "Error Updating Discord Application Command",
                        format!(
                            "Could not update Discord Application Command ID {}: {}",
                            state.command_id, e
                        ),
                    ));
                    return UpdateResourceResponse {
                        new_state: request.prior_state,
                        private: vec![],
                        diagnostics,
                    };
                }

                match response.value {
                    Some(command) => {
                        plan.refresh_from(&command);
                        UpdateResourceResponse {
                            new_state: plan.to_state(),
                            private: vec![],
                            diagnostics,
                        }
                    }
                    None => {
                        diagnostics.push(Diagnostic::error(
                            "Error Updating Discord Application Command",
                            format!(
                                "Could not update Discord Application Command ID {}: empty response body",
                                state.command_id
                            ),
                        ));
                        UpdateResourceResponse {
                            new_state: request.prior_state,
                            private: vec![],
                            diagnostics,
                        }
                    }
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error Updating Discord Application Command",
                    format!(
                        "Could not update Discord Application Command ID {}: {}",
                        state.command_id, e
                    ),
                ));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    private: vec![],
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
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return DeleteResourceResponse { diagnostics };
            }
        };

        let state = match CommandModel::from_state(&request.prior_state) {
            Ok(model) => model,
            Err(diag) => {
                diagnostics.push(diag);
                return DeleteResourceResponse { diagnostics };
            }
        };

        match provider_data
            .commands
            .delete(&ctx, &state.application_id, &state.command_id)
            .await
        {
            Ok(status) => {
                if let Err(e) = expect_status(status, &[StatusCode::NO_CONTENT]) {
                    diagnostics.push(Diagnostic::error(
                        "Error Deleting Discord Application Command",
                        format!(
                            "Could not delete Discord Application Command ID {}: {}",
                            state.command_id, e
                        ),
                    ));
                }
                DeleteResourceResponse { diagnostics }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Error Deleting Discord Application Command",
                    format!("Could not delete command, unexpected error: {}", e),
                ));
                DeleteResourceResponse { diagnostics }
            }
        }
    }
}

#[async_trait]
impl ResourceWithConfigure for CommandResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let mut diagnostics = vec![];

        if let Some(data) = request.provider_data {
            if let Some(provider_data) = data.downcast_ref::<crate::DiscordProviderData>() {
                self.provider_data = Some(provider_data.clone());
            } else {
                diagnostics.push(Diagnostic::error(
                    "Unexpected resource configure type",
                    "Expected DiscordProviderData. Please report this issue to the provider developers.",
                ));
            }
        } else {
            diagnostics.push(Diagnostic::error(
                "No provider data",
                "No provider data was provided to the resource",
            ));
        }

        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for CommandResource {
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let (application_id, command_id) = match parse_import_id(&request.id) {
            Ok(ids) => ids,
            Err(diag) => {
                return ImportResourceStateResponse {
                    imported_resources: vec![],
                    diagnostics: vec![diag],
                };
            }
        };

        // Seed only the identifying pair; the read that follows an import
        // populates everything else from the remote service.
        let mut state = DynamicValue::empty_map();
        let _ = state.set_string(&AttributePath::new("application_id"), application_id);
        let _ = state.set_string(&AttributePath::new("command_id"), command_id);

        ImportResourceStateResponse {
            imported_resources: vec![ImportedResource {
                type_name: request.type_name.clone(),
                state,
                private: vec![],
            }],
            diagnostics: vec![],
        }
    }
}
