//! Macros for declaring the answer record.

/// Declare a flat answer record together with its per-field update enum.
///
/// Generates:
/// - the struct itself, with every field public,
/// - an update enum holding one variant per field (adjacently tagged as
///   `{"field": ..., "value": ...}` with camelCase field names),
/// - `apply(&mut self, update)` on the struct, a total single-field write,
/// - `field_name()` on the update enum, for diagnostics.
///
/// # Example
///
/// ```
/// use membership_wizard::form_fields;
///
/// form_fields! {
///     #[derive(Clone, Debug, Default, PartialEq)]
///     pub struct Contact, update ContactUpdate {
///         name: String => Name,
///         opted_in: bool => OptedIn,
///     }
/// }
///
/// let mut contact = Contact::default();
/// contact.apply(ContactUpdate::Name("Ada".to_string()));
/// assert_eq!(contact.name, "Ada");
/// assert_eq!(ContactUpdate::OptedIn(true).field_name(), "opted_in");
/// ```
#[macro_export]
macro_rules! form_fields {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident, update $update:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        /// A write to exactly one field of the record.
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(tag = "field", content = "value", rename_all = "camelCase")]
        $vis enum $update {
            $($variant($ty),)*
        }

        impl $update {
            /// Name of the field this update writes.
            pub fn field_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($field),)*
                }
            }
        }

        impl $name {
            /// Write one field. Performs no validation.
            pub fn apply(&mut self, update: $update) {
                match update {
                    $($update::$variant(value) => self.$field = value,)*
                }
            }
        }
    };
}
