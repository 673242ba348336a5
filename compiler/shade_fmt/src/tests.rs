use pretty_assertions::assert_eq;
use shade_ir::SourceFile;

use crate::{print_program, write_program};

/// Parse `source`, which must be free of errors, and print it.
#[track_caller]
fn format(source: &str) -> String {
    let file = SourceFile::shared("test.wgsl", source);
    let result = shade_parse::parse(&file);
    assert!(!result.has_error(), "{}", result.error());
    print_program(&result.program)
}

#[test]
fn empty_program() {
    assert_eq!(format(""), "");
    assert_eq!(format("// nothing here\n/* or here */ ;;\n"), "");
}

#[test]
fn globals_are_separated_by_blank_lines() {
    let source = "
struct Uniforms { @align(16) color : vec4<f32>; scale : f32; };
@group(0) @binding(0) var<uniform> u : Uniforms;
let pi : f32 = 3.5;
type Pair = vec2<i32>;
";
    assert_eq!(
        format(source),
        "\
struct Uniforms {
  @align(16) color : vec4<f32>;
  scale : f32;
};

@group(0) @binding(0) var<uniform> u : Uniforms;

let pi : f32 = 3.5;

type Pair = vec2<i32>;
"
    );
}

#[test]
fn function_with_attributes_and_branches() {
    let source = "
@stage(fragment)
fn main(@location(0) uv : vec2<f32>) -> @location(0) vec4<f32> {
  var c = vec4<f32>(uv, 0.0, 1.0);
  if (uv.x < 0.5) { c.r = 1.0 - uv.x * 2.0; } else if (uv.y > 1.0) { discard; } else { }
  return c;
}
";
    assert_eq!(
        format(source),
        "\
@stage(fragment)
fn main(@location(0) uv : vec2<f32>) -> @location(0) vec4<f32> {
  var c = vec4<f32>(uv, 0.0, 1.0);
  if (uv.x < 0.5) {
    c.r = 1.0 - (uv.x * 2.0);
  } else if (uv.y > 1.0) {
    discard;
  } else {
  }
  return c;
}
"
    );
}

#[test]
fn loops_and_switch() {
    let source = "
fn f() {
  for (var i : i32 = 0; i < 4; i = i + 1) { g(i); }
  loop { break; continuing { x = -(1); } }
  switch (x) { case 1, 2u: { fallthrough; } default: { } }
}
";
    assert_eq!(
        format(source),
        "\
fn f() {
  {
    var i : i32 = 0;
    loop {
      if (!(i < 4)) {
        break;
      }
      g(i);
      continuing {
        i = i + 1;
      }
    }
  }
  loop {
    break;
    continuing {
      x = -(1);
    }
  }
  switch (x) {
    case 1, 2u: {
      fallthrough;
    }
    default: {
    }
  }
}
"
    );
}

#[test]
fn empty_for_prints_as_bare_loop() {
    assert_eq!(
        format("fn f() { for (;;) { break; } }"),
        "fn f() {\n  loop {\n    break;\n  }\n}\n"
    );
}

#[test]
fn operands_are_parenthesized() {
    let source = "fn f() { x = -a[0] + (-a)[0] * !b.c; y = -(-1) - -1; z = a < b == (c < d); }";
    assert_eq!(
        format(source),
        "\
fn f() {
  x = -a[0] + ((-a)[0] * !b.c);
  y = -(-1) - -1;
  z = (a < b) == (c < d);
}
"
    );
}

#[test]
fn literals_print_in_decimal() {
    assert_eq!(
        format("fn f() { let b = bitcast<u32>(1.0); x = 0x10 + 7u; y = !true; }"),
        "\
fn f() {
  let b = bitcast<u32>(1.0);
  x = 16 + 7u;
  y = !true;
}
"
    );
}

#[test]
fn floats_outside_the_decimal_range_print_as_hex() {
    assert_eq!(
        format("fn f() { a = 0x1p-130; b = 0x1p200; c = -0x1p200; d = 0x1.fffffep127; e = 0x1.8p1; }"),
        "\
fn f() {
  a = 0x80000p-149;
  b = 0x1p128;
  c = -0x1p128;
  d = 0x1.fffffep127;
  e = 3.0;
}
"
    );
}

#[test]
fn types() {
    let source = "
var<private> m : mat2x3<f32>;
var t : texture_2d<f32>;
var ms : texture_multisampled_2d<i32>;
var d : texture_depth_cube;
var s : texture_storage_2d<rgba8unorm>;
var e : texture_external;
var smp : sampler_comparison;
var<storage> buf : @access(read) @stride(16) array<vec4<f32>, 4>;
fn p(a : ptr<function, i32>) -> bool { return *a == 0; }
";
    assert_eq!(
        format(source),
        "\
var<private> m : mat2x3<f32>;

var t : texture_2d<f32>;

var ms : texture_multisampled_2d<i32>;

var d : texture_depth_cube;

var s : texture_storage_2d<rgba8unorm>;

var e : texture_external;

var smp : sampler_comparison;

var<storage> buf : @access(read) @stride(16) array<vec4<f32>, 4>;

fn p(a : ptr<function, i32>) -> bool {
  return *a == 0;
}
"
    );
}

#[test]
fn deprecated_spellings_print_in_current_form() {
    let source = "
[[block]] struct S { a : f32; };
[[stage(compute), workgroup_size(8, 4)]] fn main() -> void { }
const c = 1;
";
    assert_eq!(
        format(source),
        "\
@block
struct S {
  a : f32;
};

@stage(compute) @workgroup_size(8, 4)
fn main() {
}

let c = 1;
"
    );
}

#[test]
fn builtins_and_overrides() {
    let source = "
@override(3) let k : f32 = 1.0;
@override let j : i32;
fn v(@builtin(vertex_index) i : u32) -> @builtin(position) vec4<f32> { return vec4<f32>(); }
";
    assert_eq!(
        format(source),
        "\
@override(3) let k : f32 = 1.0;

@override let j : i32;

fn v(@builtin(vertex_index) i : u32) -> @builtin(position) vec4<f32> {
  return vec4<f32>();
}
"
    );
}

#[test]
fn writer_output_matches_string_output() {
    let file = SourceFile::shared("test.wgsl", "let a = 1;\nfn f() { return; }\n");
    let result = shade_parse::parse(&file);
    let written = write_program(&result.program, Vec::new()).unwrap();
    assert_eq!(
        String::from_utf8(written).unwrap(),
        print_program(&result.program)
    );
}
