#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Printed output is a fixed point of parse-then-print.
//!
//! For every input: print(parse(source)) parses without errors, and printing
//! that parse again gives identical text.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shade_fmt::print_program;
use shade_ir::{Literal, SourceFile};

/// Parse and print, requiring an error-free parse.
fn reprint(source: &str) -> Result<String, String> {
    let file = SourceFile::shared("round_trip.wgsl", source);
    let result = shade_parse::parse(&file);
    if result.has_error() {
        return Err(result.error());
    }
    Ok(print_program(&result.program))
}

#[track_caller]
fn assert_fixed_point(source: &str) {
    let first = reprint(source).expect("source parses");
    let second = reprint(&first)
        .unwrap_or_else(|error| panic!("printed output does not parse:\n{first}\n{error}"));
    assert_eq!(first, second);
}

const SHADERS: &[&str] = &[
    "
struct VertexOutput {
  @builtin(position) position : vec4<f32>;
  @location(0) color : vec3<f32>;
};

@stage(vertex)
fn vs_main(@builtin(vertex_index) index : u32) -> VertexOutput {
  var output : VertexOutput;
  let x = f32(i32(index) - 1);
  let y = f32(i32(index & 1u) * 2 - 1);
  output.position = vec4<f32>(x * 0.5, y * 0.5, 0.0, 1.0);
  output.color = vec3<f32>(x, y, 1.0 - x - y);
  return output;
}

@stage(fragment)
fn fs_main(input : VertexOutput) -> @location(0) vec4<f32> {
  return vec4<f32>(input.color, 1.0);
}
",
    "
[[block]] struct Params { count : u32; scale : f32; };
[[block]] struct Data { values : [[stride(4)]] array<f32>; };

[[group(0), binding(0)]] var<uniform> params : Params;
[[group(0), binding(1)]] var<storage> data : [[access(read_write)]] Data;
var<workgroup> scratch : array<f32, 64>;

[[stage(compute), workgroup_size(64)]]
fn main([[builtin(global_invocation_id)]] id : vec3<u32>) {
  let i = id.x;
  if (i >= params.count) {
    return;
  }
  scratch[i % 64u] = data.values[i] * params.scale;
  for (var j : u32 = 0u; j < 4u; j = j + 1u) {
    data.values[i] = data.values[i] + scratch[(i + j) % 64u];
  }
}
",
    "
type Color = vec4<f32>;
let white : Color = Color(1.0, 1.0, 1.0, 1.0);
let ids : array<i32, 3> = array<i32, 3>(1, -2, 0x7f);

fn classify(n : i32) -> i32 {
  var result : i32;
  switch (n) {
    case -1, 0: {
      result = 0;
      fallthrough;
    }
    case 1: {
      result = 1;
    }
    default: {
      result = n << 2u;
    }
  }
  return result;
}

fn spin(p : ptr<function, i32>) {
  loop {
    if (*p > 10) {
      break;
    } elseif (*p < -10) {
      discard;
    }
    *p = ~*p ^ bitcast<i32>(3u);
    continuing {
      *p = *p + 1;
    }
  }
}
",
    "
var t : texture_2d_array<f32>;
var depth : texture_depth_2d;
var storage_tex : texture_storage_3d<r32float>;
var s : sampler;
var<private> m : mat4x4<f32> = mat4x4<f32>(
  vec4<f32>(1.0, 0.0, 0.0, 0.0),
  vec4<f32>(0.0, 1.0, 0.0, 0.0),
  vec4<f32>(0.0, 0.0, 1.0, 0.0),
  vec4<f32>(0.0, 0.0, 0.0, 1.0),
);
fn f() -> bool {
  return !(1.5e3 > 2.0) || -m[0].x != 0.0 && (true || false);
}
",
    "
fn g() {
  let tiny = 0x1p-130;
  let huge = 0x1p200;
  let max = 0x1.fffffep127;
  let small = 1e-7;
  x = tiny * huge - max / small;
}
",
];

#[test]
fn shaders_are_fixed_points() {
    for source in SHADERS {
        assert_fixed_point(source);
    }
}

#[test]
fn for_loop_prints_as_loop() {
    let from_for = reprint("fn f() { for (;;) { } }").unwrap();
    let from_loop = reprint("fn f() { loop { } }").unwrap();
    assert_eq!(from_for, from_loop);
}

#[test]
fn layout_and_comments_do_not_matter() {
    let compact = reprint("fn f(){x=(a+b)*c;return;}").unwrap();
    let spread = reprint(
        "// comment
         fn   f ( )
         {
           /* note */ x =
             ( a + b ) * c ;
           return ;
         }",
    )
    .unwrap();
    assert_eq!(compact, spread);
}

fn arb_ident() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("value".to_string()),
        Just("v2".to_string()),
    ]
}

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_ident(),
        (0i32..100).prop_map(|n| n.to_string()),
        (-100i32..0).prop_map(|n| n.to_string()),
        (0u32..100).prop_map(|n| format!("{n}u")),
        (0u32..1000).prop_map(|n| format!("{}.{}", n / 10, n % 10)),
        arb_float(),
        Just("true".to_string()),
    ]
}

/// Float literals across the whole binary32 range, written the way the
/// printer writes them, plus hex forms that underflow or overflow.
fn arb_float() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<u32>()
            .prop_map(f32::from_bits)
            .prop_filter("not a literal value", |v| !v.is_nan())
            .prop_map(|v| Literal::Float(v).to_string()),
        (1u32..0x80_0000).prop_map(|m| format!("0x{m:x}p-149")),
        (-160i32..-126).prop_map(|e| format!("0x1.8p{e}")),
        (128i32..300).prop_map(|e| format!("-0x1p{e}")),
    ]
}

const BINARY_OPS: &[&str] = &[
    "||", "&&", "|", "^", "&", "==", "!=", "<", ">", "<=", ">=", "<<", ">>", "+", "-", "*", "/",
    "%",
];

fn arb_expr() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), 0..BINARY_OPS.len(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {} {r}", BINARY_OPS[op])),
            inner.clone().prop_map(|e| format!("({e})")),
            (prop_oneof![Just("-"), Just("!"), Just("~")], inner.clone())
                .prop_map(|(op, e)| format!("{op}({e})")),
            (arb_ident(), inner.clone()).prop_map(|(base, i)| format!("{base}[{i}]")),
            inner.clone().prop_map(|e| format!("({e}).x")),
            (inner.clone(), inner.clone()).prop_map(|(x, y)| format!("f({x}, {y})")),
            (inner.clone(), inner).prop_map(|(x, y)| format!("vec2<f32>({x}, {y})")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn expressions_are_fixed_points(expr in arb_expr()) {
        let source = format!("fn f() {{ x = {expr}; }}");
        let first = reprint(&source);
        prop_assume!(first.is_ok());
        let first = first.unwrap();
        let second = reprint(&first);
        prop_assert!(second.is_ok(), "{}\n{:?}", first, second);
        prop_assert_eq!(first, second.unwrap());
    }
}
