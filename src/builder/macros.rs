//! Macros for declaring state identities.

/// Declare a `#[repr(u8)]` enum of state identities.
///
/// A `None` variant with value 0 is inserted first, so the listed variants
/// number from 1 and can never collide with the sentinel. The enum converts
/// into [`StateId`](crate::core::StateId) and carries a `NAMES` table indexed
/// by identity, ready for auto-registration.
///
/// # Example
///
/// ```
/// use ticking_fsm::core::StateId;
/// use ticking_fsm::state_ids;
///
/// state_ids! {
///     pub enum Door {
///         Closed,
///         Opening,
///         Open,
///     }
/// }
///
/// assert_eq!(StateId::from(Door::Closed), StateId::new(1));
/// assert_eq!(Door::NAMES, &["None", "Closed", "Opening", "Open"]);
/// assert_eq!(Door::Open.name(), "Open");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            None = 0,
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            /// State names indexed by identity, `None` first.
            pub const NAMES: &'static [&'static str] = &["None", $(stringify!($variant)),+];

            pub const fn id(self) -> $crate::core::StateId {
                $crate::core::StateId::new(self as u8)
            }

            pub fn name(self) -> &'static str {
                Self::NAMES[self as usize]
            }
        }

        impl From<$name> for $crate::core::StateId {
            fn from(value: $name) -> Self {
                value.id()
            }
        }
    };
}
