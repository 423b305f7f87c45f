#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Copy,
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            postgres_types::ToSql,
            postgres_types::FromSql,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[repr(transparent)]
        #[postgres(transparent)]
        #[serde(transparent)] // JSON = plain UUID string
        pub struct $name(pub uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            #[inline]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
            #[inline]
            pub fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }
            #[inline]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
            #[inline]
            pub fn from_uuid(u: uuid::Uuid) -> Self {
                Self(u)
            }
            #[inline]
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl core::convert::TryFrom<&str> for $name {
            type Error = uuid::Error;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(v: uuid::Uuid) -> Self {
                Self(v)
            }
        }
        impl From<$name> for uuid::Uuid {
            fn from(v: $name) -> uuid::Uuid {
                v.0
            }
        }
        impl AsRef<uuid::Uuid> for $name {
            fn as_ref(&self) -> &uuid::Uuid {
                &self.0
            }
        }
    };
}

define_id!(ItemId);
define_id!(LinkId);
define_id!(PlayerId);
define_id!(RoomId);

/// Maximum length of a resource name, in characters.
pub const MAX_NAME_LEN: usize = 255;
/// Maximum length of a resource description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 4096;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// List pagination bounds. A zero limit means "no LIMIT clause"; callers that
/// want the API default should go through [`Pagination::clamped`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Applies the default limit when none was given and caps it at
    /// [`MAX_LIMIT`].
    pub fn clamped(self) -> Self {
        let limit = if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit.min(MAX_LIMIT)
        };

        Self { limit, offset: self.offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_pagination_default_applied() {
        let p = Pagination::new(0, 0).clamped();
        assert_eq!(p.limit, DEFAULT_LIMIT);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn t_pagination_capped() {
        let p = Pagination::new(5000, 20).clamped();
        assert_eq!(p.limit, MAX_LIMIT);
        assert_eq!(p.offset, 20);
    }

    #[test]
    fn t_pagination_in_range_untouched() {
        let p = Pagination::new(10, 5).clamped();
        assert_eq!(p, Pagination::new(10, 5));
    }

    #[test]
    fn t_id_roundtrip() {
        let id = RoomId::new();
        let parsed: RoomId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!(!id.is_nil());
        assert!(RoomId::nil().is_nil());
    }
}
