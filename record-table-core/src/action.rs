//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to a [`Store`](crate::Store)
///
/// Actions describe something that happened (a key press mapped to an intent,
/// a submitted form). They must be:
/// - Clone: middleware and tests keep copies
/// - Debug: for logging
/// - Send + 'static: actions cross the event poller's channel
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name used for logging and filtering
    fn name(&self) -> &'static str;

    /// Optional grouping (e.g. `"record"`, `"filter"`) for test assertions
    fn category(&self) -> Option<&'static str> {
        None
    }
}

/// Concise representation of an action for log lines
///
/// The default uses `Debug`; data-heavy actions should override it.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

/// Declare an action enum grouped by category and implement [`Action`] for it.
///
/// `name` is the variant name. `category` is the group label, or `None` for
/// the `_` group.
///
/// ```ignore
/// record_table_core::action_enum! {
///     #[derive(Clone, Debug, PartialEq)]
///     pub enum Action {
///         record {
///             /// Open the form with an empty draft
///             RecordAddRequested,
///             RecordDeleteRequested(usize),
///         }
///         _ {
///             Quit,
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! action_enum {
    (@category _) => {
        None
    };
    (@category $category:ident) => {
        Some(stringify!($category))
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $category:tt {
                    $(
                        $(#[$variant_meta:meta])*
                        $variant:ident $( ( $($field:ty),* $(,)? ) )?
                    ),* $(,)?
                }
            )*
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(
                $(#[$variant_meta])*
                $variant $( ( $($field),* ) )?,
            )*)*
        }

        impl $crate::Action for $name {
            fn name(&self) -> &'static str {
                match self {
                    $($(
                        Self::$variant { .. } => stringify!($variant),
                    )*)*
                }
            }

            fn category(&self) -> Option<&'static str> {
                match self {
                    $($(
                        Self::$variant { .. } => $crate::action_enum!(@category $category),
                    )*)*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Action as _;

    crate::action_enum! {
        #[derive(Clone, Debug, PartialEq)]
        enum Sample {
            item {
                /// documented
                ItemAdd(String),
                ItemMove(usize, usize),
                ItemClear,
            }
            _ {
                Quit,
            }
        }
    }

    #[test]
    fn test_names_and_categories() {
        assert_eq!(Sample::ItemAdd("x".into()).name(), "ItemAdd");
        assert_eq!(Sample::ItemMove(1, 2).name(), "ItemMove");
        assert_eq!(Sample::ItemClear.category(), Some("item"));
        assert_eq!(Sample::Quit.name(), "Quit");
        assert_eq!(Sample::Quit.category(), None);
    }
}
