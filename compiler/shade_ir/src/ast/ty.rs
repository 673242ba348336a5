//! Type specifier nodes.

use crate::{DecorationRange, Range, Symbol, TypeId};

#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub range: Range,
}

impl Type {
    pub fn new(kind: TypeKind, range: Range) -> Self {
        Type { kind, range }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    Bool,
    F32,
    I32,
    U32,
    /// Return type of functions without `->`.
    Void,
    /// `vecN<T>`, `width` in 2..=4.
    Vector { width: u8, elem: TypeId },
    /// `matCxR<T>`
    Matrix { columns: u8, rows: u8, elem: TypeId },
    /// `ptr<class, T>`
    Pointer { storage: StorageClass, pointee: TypeId },
    /// `array<T>` or `array<T, N>`; a leading `@stride` lands in `decorations`.
    Array {
        elem: TypeId,
        size: Option<u32>,
        decorations: DecorationRange,
    },
    /// A struct or alias name.
    Named(Symbol),
    Sampler(SamplerKind),
    SampledTexture { dim: TextureDimension, elem: TypeId },
    MultisampledTexture { dim: TextureDimension, elem: TypeId },
    DepthTexture(TextureDimension),
    StorageTexture {
        dim: TextureDimension,
        format: TexelFormat,
    },
    ExternalTexture,
    /// A type qualified by an `@access` decoration on its declaration.
    Access { access: Access, ty: TypeId },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SamplerKind {
    Sampler,
    Comparison,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureDimension {
    D1,
    D2,
    D2Array,
    D3,
    Cube,
    CubeArray,
}

impl TextureDimension {
    /// Suffix used in texture keywords, `texture_<suffix>`.
    pub const fn suffix(self) -> &'static str {
        match self {
            TextureDimension::D1 => "1d",
            TextureDimension::D2 => "2d",
            TextureDimension::D2Array => "2d_array",
            TextureDimension::D3 => "3d",
            TextureDimension::Cube => "cube",
            TextureDimension::CubeArray => "cube_array",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    pub const fn as_str(self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
            Access::ReadWrite => "read_write",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "read" => Some(Access::Read),
            "write" => Some(Access::Write),
            "read_write" => Some(Access::ReadWrite),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Input,
    Output,
    Uniform,
    Workgroup,
    Storage,
    Image,
    Private,
    Function,
}

impl StorageClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageClass::Input => "in",
            StorageClass::Output => "out",
            StorageClass::Uniform => "uniform",
            StorageClass::Workgroup => "workgroup",
            StorageClass::Storage => "storage",
            StorageClass::Image => "image",
            StorageClass::Private => "private",
            StorageClass::Function => "function",
        }
    }
}

macro_rules! texel_formats {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Storage texture texel formats.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum TexelFormat {
            $($variant,)*
        }

        impl TexelFormat {
            pub const ALL: &'static [TexelFormat] = &[$(TexelFormat::$variant,)*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(TexelFormat::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(TexelFormat::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

texel_formats! {
    R8Unorm => "r8unorm",
    R8Snorm => "r8snorm",
    R8Uint => "r8uint",
    R8Sint => "r8sint",
    R16Uint => "r16uint",
    R16Sint => "r16sint",
    R16Float => "r16float",
    Rg8Unorm => "rg8unorm",
    Rg8Snorm => "rg8snorm",
    Rg8Uint => "rg8uint",
    Rg8Sint => "rg8sint",
    R32Uint => "r32uint",
    R32Sint => "r32sint",
    R32Float => "r32float",
    Rg16Uint => "rg16uint",
    Rg16Sint => "rg16sint",
    Rg16Float => "rg16float",
    Rgba8Unorm => "rgba8unorm",
    Rgba8UnormSrgb => "rgba8unorm_srgb",
    Rgba8Snorm => "rgba8snorm",
    Rgba8Uint => "rgba8uint",
    Rgba8Sint => "rgba8sint",
    Bgra8Unorm => "bgra8unorm",
    Bgra8UnormSrgb => "bgra8unorm_srgb",
    Rgb10A2Unorm => "rgb10a2unorm",
    Rg11B10Float => "rg11b10float",
    Rg32Uint => "rg32uint",
    Rg32Sint => "rg32sint",
    Rg32Float => "rg32float",
    Rgba16Uint => "rgba16uint",
    Rgba16Sint => "rgba16sint",
    Rgba16Float => "rgba16float",
    Rgba32Uint => "rgba32uint",
    Rgba32Sint => "rgba32sint",
    Rgba32Float => "rgba32float",
}
