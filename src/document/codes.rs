//! Integer code tables used by the JSAF schema
//!
//! Documents keep the raw integer so nothing is lost on decoding; these
//! tables only turn a code into a label. A code that is not in a table is
//! rendered as its number.

use std::borrow::Cow;
use std::fmt;

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every known variant in code order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Decode a raw code
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Raw code of this variant
            pub fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Human readable label
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Label for a raw code, or the code itself when unknown
            pub fn describe(code: i64) -> Cow<'static, str> {
                match Self::from_code(code) {
                    Some(known) => Cow::Borrowed(known.label()),
                    None => Cow::Owned(code.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_table! {
    /// Material family
    MaterialType {
        Other = 0 => "Other",
        Concrete = 1 => "Concrete",
        Steel = 2 => "Steel",
        Timber = 3 => "Timber",
        Aluminium = 4 => "Aluminium",
        Masonry = 5 => "Masonry",
    }
}

code_table! {
    /// Cross-section shape. Codes not listed here pass through as numbers.
    SectionShape {
        Circle = 0 => "Circle",
        Rectangle = 1 => "Rectangle",
        ISection = 6 => "I Section",
        TSection = 9 => "T Section",
        USection = 14 => "U Section",
        Pipe = 16 => "Pipe",
    }
}

code_table! {
    /// How a cross-section is defined
    SectionType {
        Parametric = 0 => "Parametric",
        Manufactured = 1 => "Manufactured",
        Compound = 2 => "Compound",
        General = 3 => "General",
    }
}

code_table! {
    /// Bar role
    CurveType {
        General = 0 => "General",
        Beam = 1 => "Beam",
        Column = 2 => "Column",
        SlabRib = 10 => "SlabRib",
    }
}

code_table! {
    /// Surface role
    SurfaceType {
        Plate = 0 => "Plate",
        Wall = 1 => "Wall",
        Shell = 2 => "Shell",
        RibbedSlab = 3 => "Ribbed Slab",
    }
}

code_table! {
    /// Restraint of a translational degree of freedom
    TranslationRestraint {
        Free = 0 => "Free",
        Rigid = 1 => "Rigid",
        Flexible = 2 => "Flexible",
        CompressionOnly = 3 => "Comp. Only",
        TensionOnly = 4 => "Tension Only",
    }
}

code_table! {
    /// Restraint of a rotational degree of freedom
    RotationRestraint {
        Free = 0 => "Free",
        Rigid = 1 => "Rigid",
        Flexible = 2 => "Flexible",
    }
}

code_table! {
    /// Load case action type
    ActionType {
        Permanent = 0 => "Permanent",
        Variable = 1 => "Variable",
        Accidental = 2 => "Accidental",
    }
}

code_table! {
    /// Load case load type
    LoadType {
        SelfWeight = 0 => "Self Weight",
        Others = 1 => "Others",
        Prestress = 2 => "Prestress",
        Dynamic = 3 => "Dynamic",
        Static = 4 => "Static",
        Temperature = 5 => "Temperature",
        Wind = 6 => "Wind",
        Snow = 7 => "Snow",
        Maintenance = 8 => "Maintenance",
        Fire = 9 => "Fire",
        Moving = 10 => "Moving",
        Seismic = 11 => "Seismic",
        Standard = 12 => "Standard",
    }
}

code_table! {
    /// Load combination category
    CombinationCategory {
        Undefined = 0 => "Undefined",
        /// Ultimate limit state
        Uls = 1 => "ULS",
        /// Serviceability limit state
        Sls = 2 => "SLS",
        /// Accidental limit state
        Als = 3 => "ALS",
        NationalStandard = 4 => "National Std",
    }
}

code_table! {
    /// Coordinate system of an action
    CoordinateSystem {
        Global = 0 => "Global",
        Local = 1 => "Local",
    }
}

code_table! {
    /// Distribution of a curve action along its bar
    Distribution {
        Uniform = 0 => "Uniform",
        Trapezoidal = 1 => "Trapezoidal",
    }
}
