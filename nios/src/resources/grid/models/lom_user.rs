use std::sync::Arc;

use tfplug::defaults::StaticDefault;
use tfplug::flex;
use tfplug::plan_modifier::Immutable;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{OneOfValidator, TrimmedStringValidator};
use tfplug::{state_model, Diagnostics, ObjectMapper};

use crate::api::grid::MemberLomUser;

state_model! {
    /// One entry of `lom_users`
    pub struct MemberLomUserModel {
        pub name: String => "name",
        pub password: String => "password",
        pub role: String => "role",
        pub disable: bool => "disable",
        pub comment: String => "comment",
    }
}

pub fn lom_user_attributes() -> Vec<Attribute> {
    vec![
        AttributeBuilder::new("name", AttributeType::String)
            .description("The LOM user name.")
            .required()
            .validator(TrimmedStringValidator::create())
            .build(),
        AttributeBuilder::new("password", AttributeType::String)
            .description("The LOM user password.")
            .required()
            .sensitive()
            .validator(TrimmedStringValidator::create())
            .plan_modifier(Arc::new(Immutable))
            .build(),
        AttributeBuilder::new("role", AttributeType::String)
            .description(
                "The LOM user role which specifies the list of actions that are allowed for the user.",
            )
            .optional()
            .computed()
            .default(StaticDefault::string("USER"))
            .validator(OneOfValidator::create(&["OPERATOR", "USER"]))
            .build(),
        AttributeBuilder::new("disable", AttributeType::Bool)
            .description("Determines whether the LOM user is disabled.")
            .optional()
            .computed()
            .default(StaticDefault::bool(false))
            .build(),
        AttributeBuilder::new("comment", AttributeType::String)
            .description("The descriptive comment for the LOM user.")
            .optional()
            .computed()
            .default(StaticDefault::string(""))
            .build(),
    ]
}

impl ObjectMapper for MemberLomUserModel {
    type Wire = MemberLomUser;

    fn expand(&self, _diags: &mut Diagnostics) -> Option<MemberLomUser> {
        Some(MemberLomUser {
            name: flex::expand_string(&self.name),
            password: flex::expand_string(&self.password),
            role: flex::expand_string(&self.role),
            disable: flex::expand_bool(&self.disable),
            comment: flex::expand_string(&self.comment),
        })
    }

    fn flatten(wire: &MemberLomUser, _diags: &mut Diagnostics) -> Self {
        Self {
            name: flex::flatten_string(wire.name.as_deref()),
            password: flex::flatten_string(wire.password.as_deref()),
            role: flex::flatten_string(wire.role.as_deref()),
            disable: flex::flatten_bool(wire.disable),
            comment: flex::flatten_string(wire.comment.as_deref()),
        }
    }
}
