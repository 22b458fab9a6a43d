//! Macro for port error enums whose variants each carry a `message`.
//!
//! Every variant gets a snake_case constructor accepting `impl Into<String>`,
//! so adapters write `EmployeeRepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Build a [`" $name "::" $variant "`] error."]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Detail text carried by every variant.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } )|* => message,
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "unreachable: {message}",
            Rejected => "rejected: {message}",
        }
    }

    #[test]
    fn constructors_accept_borrowed_input() {
        let err = SamplePortError::unreachable("socket closed");
        assert_eq!(err.to_string(), "unreachable: socket closed");
        assert_eq!(err.message(), "socket closed");
    }

    #[test]
    fn variants_are_distinct() {
        assert_ne!(
            SamplePortError::rejected("x"),
            SamplePortError::unreachable("x")
        );
    }
}
