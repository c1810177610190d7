//! Typed IDs for the entities settlement touches.
//!
//! Every table key gets its own newtype so a product ID can never stand in
//! for a user ID at a call site. The wrappers are totally ordered because
//! checkout locks principal rows in ascending-ID order and the sort has to
//! be deterministic.

/// Define an `i32`-backed ID newtype.
///
/// The generated type is `Copy`, hashable, and ordered, serializes as the
/// bare integer, converts to and from `i32`, and binds directly in sqlx
/// queries when the `postgres` feature is on.
///
/// ```rust
/// # use smartcart_core::define_id;
/// define_id!(UserId);
///
/// let mut principals = vec![UserId::new(3), UserId::new(1)];
/// principals.sort();
/// assert_eq!(principals.first(), Some(&UserId::new(1)));
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[derive(::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database key.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// The raw database key.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                <i32 as ::core::fmt::Display>::fmt(&self.0, f)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let raw = <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(raw))
            }
        }
    };
}

// One ID per settled entity
define_id!(UserId);
define_id!(ProductId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(CartId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_sort_ascending() {
        let mut principals = vec![UserId::new(9), UserId::new(2), UserId::new(5)];
        principals.sort();
        assert_eq!(
            principals,
            vec![UserId::new(2), UserId::new(5), UserId::new(9)]
        );
    }

    #[test]
    fn test_ids_serialize_as_bare_integers() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_conversions() {
        let id = OrderId::from(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(i32::from(id), 7);
        assert_eq!(OrderId::new(7).as_i32(), 7);
    }
}
