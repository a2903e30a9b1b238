//! Macro generating port error enums with snake_case constructors.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StorePortError {
//!         Connection { message: String } => "store connection failed: {message}",
//!     }
//! }
//! let err = StorePortError::connection("refused");
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@fields $variant [] [] $( $field : $ty, )*);
    };

    (@fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @fields
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum GaragePortError {
            Closed => "garage closed",
            Refused { message: String } => "garage refused: {message}",
            Full { capacity: u16 } => "garage full at {capacity} cars",
            Jammed { message: String, bay: u16 } => "bay {bay} jammed: {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(GaragePortError::closed().to_string(), "garage closed");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = GaragePortError::refused("no keys");
        assert_eq!(err.to_string(), "garage refused: no keys");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        assert_eq!(
            GaragePortError::full(12_u16).to_string(),
            "garage full at 12 cars"
        );
        assert_eq!(
            GaragePortError::jammed("door", 3_u16).to_string(),
            "bay 3 jammed: door"
        );
    }
}
