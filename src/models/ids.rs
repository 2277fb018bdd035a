//! Identifier newtypes.
//!
//! Every identifier is a UUID underneath. Distinct types keep a question id
//! from being passed where a quiz id is expected; [`ResourceId`] is the
//! untyped form the authorization layer dispatches on. All of them serialize
//! as hyphenated strings so documents and filters agree on the encoding.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.hyphenated().fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = uuid::Error;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

macro_rules! resource_id_conversions {
    ($($name:ident),+) => {
        $(
            impl From<$name> for ResourceId {
                fn from(id: $name) -> Self {
                    Self(id.as_uuid())
                }
            }

            impl From<ResourceId> for $name {
                fn from(id: ResourceId) -> Self {
                    Self(id.as_uuid())
                }
            }
        )+
    };
}

uuid_id!(
    /// The authenticated actor making a request.
    PrincipalId
);
uuid_id!(QuizId);
uuid_id!(QuestionId);
uuid_id!(AnswerOptionId);
uuid_id!(
    /// Kind-agnostic identifier handed to the authorization resolver.
    ResourceId
);

resource_id_conversions!(QuizId, QuestionId, AnswerOptionId);
