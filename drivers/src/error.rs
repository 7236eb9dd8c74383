/*++

Licensed under the Apache-2.0 license.

File Name:

    error.rs

Abstract:

    File contains API and macros used by the library for error handling

--*/

/// NTR card library component
pub enum CardComponent {
    /// Flag encoder
    Flags = 1,

    /// Command transport
    Transport = 2,

    /// Reset sequence
    Reset = 3,
}

#[macro_export]
macro_rules! card_err_def {
    ($comp_name:ident, $enum_name: ident { $($field_name: ident = $field_val: literal,)* }) => {

        #[derive(Debug, Copy, Clone, Eq, PartialEq)]
        pub enum $enum_name {
            $($field_name = $field_val,)*
        }

        macro_rules! raise_err { ($comp_err: ident) => {
            Err((((crate::error::CardComponent::$comp_name) as u32) << 24) | ($enum_name::$comp_err as u32))?
        } }

    };
}
