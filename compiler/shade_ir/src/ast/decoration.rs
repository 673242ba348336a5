//! Decoration (attribute) nodes.

use crate::{Access, ExprId, Range};

#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub range: Range,
}

impl Decoration {
    pub fn new(kind: DecorationKind, range: Range) -> Self {
        Decoration { kind, range }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecorationKind {
    Access(Access),
    Location(u32),
    Binding(u32),
    Group(u32),
    Builtin(Builtin),
    /// Each dimension is a literal or identifier expression.
    WorkgroupSize {
        x: ExprId,
        y: Option<ExprId>,
        z: Option<ExprId>,
    },
    Stage(PipelineStage),
    Block,
    Stride(u32),
    Offset(u32),
    Size(u32),
    Align(u32),
    /// Pipeline-overridable constant, with an optional explicit id.
    Override(Option<u32>),
}

impl DecorationKind {
    /// Attribute name as written in source.
    pub const fn name(&self) -> &'static str {
        match self {
            DecorationKind::Access(_) => "access",
            DecorationKind::Location(_) => "location",
            DecorationKind::Binding(_) => "binding",
            DecorationKind::Group(_) => "group",
            DecorationKind::Builtin(_) => "builtin",
            DecorationKind::WorkgroupSize { .. } => "workgroup_size",
            DecorationKind::Stage(_) => "stage",
            DecorationKind::Block => "block",
            DecorationKind::Stride(_) => "stride",
            DecorationKind::Offset(_) => "offset",
            DecorationKind::Size(_) => "size",
            DecorationKind::Align(_) => "align",
            DecorationKind::Override(_) => "override",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Vertex,
    Fragment,
    Compute,
}

impl PipelineStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Vertex => "vertex",
            PipelineStage::Fragment => "fragment",
            PipelineStage::Compute => "compute",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vertex" => Some(PipelineStage::Vertex),
            "fragment" => Some(PipelineStage::Fragment),
            "compute" => Some(PipelineStage::Compute),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Position,
    VertexIndex,
    InstanceIndex,
    FrontFacing,
    FragDepth,
    LocalInvocationId,
    LocalInvocationIndex,
    GlobalInvocationId,
    WorkgroupId,
    SampleIndex,
    SampleMask,
}

impl Builtin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Builtin::Position => "position",
            Builtin::VertexIndex => "vertex_index",
            Builtin::InstanceIndex => "instance_index",
            Builtin::FrontFacing => "front_facing",
            Builtin::FragDepth => "frag_depth",
            Builtin::LocalInvocationId => "local_invocation_id",
            Builtin::LocalInvocationIndex => "local_invocation_index",
            Builtin::GlobalInvocationId => "global_invocation_id",
            Builtin::WorkgroupId => "workgroup_id",
            Builtin::SampleIndex => "sample_index",
            Builtin::SampleMask => "sample_mask",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "position" => Builtin::Position,
            "vertex_index" | "vertex_idx" => Builtin::VertexIndex,
            "instance_index" | "instance_idx" => Builtin::InstanceIndex,
            "front_facing" => Builtin::FrontFacing,
            "frag_depth" => Builtin::FragDepth,
            "local_invocation_id" => Builtin::LocalInvocationId,
            "local_invocation_index" | "local_invocation_idx" => Builtin::LocalInvocationIndex,
            "global_invocation_id" => Builtin::GlobalInvocationId,
            "workgroup_id" => Builtin::WorkgroupId,
            "sample_index" => Builtin::SampleIndex,
            "sample_mask" => Builtin::SampleMask,
            _ => return None,
        })
    }

    /// Deprecated spellings that still resolve, mapped to their replacement.
    pub fn from_deprecated_name(name: &str) -> Option<Self> {
        match name {
            "frag_coord" => Some(Builtin::Position),
            "sample_mask_in" | "sample_mask_out" => Some(Builtin::SampleMask),
            _ => None,
        }
    }
}
