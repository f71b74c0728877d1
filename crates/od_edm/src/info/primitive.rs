use core::fmt;

// -----------------------------------------------------------------------------
// PrimitiveKind

/// The built-in `Edm.*` primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    TimeOfDay,
}

impl PrimitiveKind {
    const ALL: [PrimitiveKind; 16] = [
        Self::Binary,
        Self::Boolean,
        Self::Byte,
        Self::Date,
        Self::DateTimeOffset,
        Self::Decimal,
        Self::Double,
        Self::Duration,
        Self::Guid,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::SByte,
        Self::Single,
        Self::String,
        Self::TimeOfDay,
    ];

    /// Returns the qualified name, e.g. `Edm.Int32`.
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Binary => "Edm.Binary",
            Self::Boolean => "Edm.Boolean",
            Self::Byte => "Edm.Byte",
            Self::Date => "Edm.Date",
            Self::DateTimeOffset => "Edm.DateTimeOffset",
            Self::Decimal => "Edm.Decimal",
            Self::Double => "Edm.Double",
            Self::Duration => "Edm.Duration",
            Self::Guid => "Edm.Guid",
            Self::Int16 => "Edm.Int16",
            Self::Int32 => "Edm.Int32",
            Self::Int64 => "Edm.Int64",
            Self::SByte => "Edm.SByte",
            Self::Single => "Edm.Single",
            Self::String => "Edm.String",
            Self::TimeOfDay => "Edm.TimeOfDay",
        }
    }

    /// Returns the unqualified name, e.g. `Int32`.
    #[inline]
    pub fn name(self) -> &'static str {
        let full = self.full_name();
        &full["Edm.".len()..]
    }

    /// Parses a qualified (`Edm.Guid`) or unqualified (`Guid`) name.
    ///
    /// # Examples
    ///
    /// ```
    /// use od_edm::info::PrimitiveKind;
    ///
    /// assert_eq!(PrimitiveKind::from_name("Edm.Guid"), Some(PrimitiveKind::Guid));
    /// assert_eq!(PrimitiveKind::from_name("Int64"), Some(PrimitiveKind::Int64));
    /// assert_eq!(PrimitiveKind::from_name("ODataDemo.Color"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_prefix("Edm.").unwrap_or(name);
        Self::ALL.into_iter().find(|kind| kind.name() == short)
    }

    /// Range of the integral kinds, `None` for the others.
    pub const fn integral_range(self) -> Option<(i64, i64)> {
        match self {
            Self::Byte => Some((u8::MIN as i64, u8::MAX as i64)),
            Self::SByte => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Single | Self::Double | Self::Decimal)
    }

    /// Kinds whose wire form is always a string.
    #[inline]
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Guid
                | Self::Date
                | Self::DateTimeOffset
                | Self::Duration
                | Self::TimeOfDay
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.full_name())
    }
}
