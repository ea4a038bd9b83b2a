//! Ready-made traces
//!
//! Each demo builds a [`TraceEngine`], defines its functions and runs one
//! concrete execution. The binary previews them; the integration tests
//! check their addresses and frame history.

use crate::geometry::Rect;
use crate::memory::value::{Value, VarType};
use crate::trace::engine::TraceEngine;
use crate::trace::errors::Result;
use crate::trace::function::FunctionDefinition;

/// A named, buildable trace
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> Result<TraceEngine>,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "fact",
        description: "recursive factorial of 4, read from the console",
        build: factorial,
    },
    Demo {
        name: "list",
        description: "two linked-list nodes allocated on the heap",
        build: linked_list,
    },
    Demo {
        name: "sum",
        description: "summation loop with a parameter and two locals",
        build: sum_to,
    },
];

/// Look a demo up by name
pub fn demo(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name == name)
}

/// Engine with the slide regions every demo shares
fn stage() -> TraceEngine {
    let mut engine = TraceEngine::new();
    engine.set_stack_frame_region(Rect::new(20.0, 20.0, 440.0, 300.0));
    engine.set_heap_stack_region(Rect::new(480.0, 20.0, 280.0, 400.0));
    engine.set_console_region(Rect::new(20.0, 340.0, 440.0, 80.0));
    engine
}

const FACT_MAIN: &[&str] = &[
    "int main(void) {",
    "  int n;",
    "  printf(\"n? \");",
    "  scanf(\"%d\", &n);",
    "  printf(\"%d\\n\", fact(n));",
    "  return 0;",
    "}",
];

const FACT: &[&str] = &[
    "int fact(int n) {",
    "  if (n <= 1) {",
    "    return 1;",
    "  }",
    "  return n * fact(n - 1);",
    "}",
];

/// `main` reads 4 and prints `fact(4)`: five frames, result 24
pub fn factorial() -> Result<TraceEngine> {
    let mut engine = stage();
    engine.set_frame_height(Some(200.0));

    engine.define_function(FunctionDefinition::new("main", FACT_MAIN).with_step_through(
        |engine, _args| {
            let n = engine.declare_local("n", VarType::Int)?;
            engine.end_declarations()?;

            engine.highlight_line_of("printf(\"n? \")")?;
            engine.print("n? ");
            engine.highlight_line_of("scanf")?;
            engine.read_line("", "4");
            engine.set(n, 4)?;

            engine.highlight("fact(n)")?;
            let arg = engine.value(n)?.clone();
            let result = engine.call("fact", &[arg])?;
            engine.highlight_line_of("printf(\"%d")?;
            engine.println(&result.to_string());

            engine.highlight_line_of("return 0;")?;
            Ok(Value::Int(0))
        },
    ))?;

    engine.define_function(FunctionDefinition::new("fact", FACT).with_step_through(
        |engine, args| {
            let n = engine.declare_param("n", VarType::Int, engine.arg(args, 0)?)?;
            engine.end_declarations()?;

            engine.highlight("n <= 1")?;
            let value = engine.value(n)?.expect_int()?;
            if value <= 1 {
                engine.highlight_line_of("return 1;")?;
                return Ok(Value::Int(1));
            }

            engine.highlight("fact(n - 1)")?;
            let rest = engine.call("fact", &[Value::Int(value - 1)])?.expect_int()?;
            engine.highlight_line_of("return n * fact")?;
            Ok(Value::Int(value * rest))
        },
    ))?;

    engine.call("main", &[])?;
    Ok(engine)
}

const LIST_MAIN: &[&str] = &[
    "int main(void) {",
    "  Node *head = NULL;",
    "  head = malloc(sizeof(Node));",
    "  head->data = 7;",
    "  head->link = malloc(sizeof(Node));",
    "  head->link->data = 9;",
    "  head->link->link = NULL;",
    "  return 0;",
    "}",
];

/// Two nodes on the heap, `head` pointing at the first
pub fn linked_list() -> Result<TraceEngine> {
    let mut engine = stage();

    engine.define_function(FunctionDefinition::new("main", LIST_MAIN).with_step_through(
        |engine, _args| {
            let head = engine.declare_local("head", VarType::Pointer)?;
            engine.end_declarations()?;
            engine.highlight_line_of("Node *head")?;
            engine.set(head, Value::Null)?;

            engine.highlight("malloc(sizeof(Node))")?;
            let data = engine.allocate_word(Some("data"));
            let link = engine.allocate_word(Some("link"));
            let address = engine.address_of(data)?;
            engine.set(head, address)?;

            engine.highlight_line_of("head->data = 7")?;
            engine.set_cell(data, 7)?;

            engine.highlight_line_of("head->link = malloc")?;
            let next_data = engine.allocate_word(Some("data"));
            let next_link = engine.allocate_word(Some("link"));
            let address = engine.address_of(next_data)?;
            engine.set_cell(link, address)?;

            engine.highlight_line_of("head->link->data")?;
            engine.set_cell(next_data, 9)?;
            engine.highlight_line_of("head->link->link")?;
            engine.set_cell(next_link, Value::Null)?;

            engine.highlight_line_of("return 0;")?;
            Ok(Value::Int(0))
        },
    ))?;

    engine.call("main", &[])?;
    Ok(engine)
}

const SUM_TO: &[&str] = &[
    "int sumTo(int n) {",
    "  int result = 0;",
    "  for (int i = 1; i <= n; i++) {",
    "    result += i;",
    "  }",
    "  return result;",
    "}",
];

/// `sumTo(3)` as the outermost call, then its result printed
pub fn sum_to() -> Result<TraceEngine> {
    let mut engine = stage();

    engine.define_function(FunctionDefinition::new("sumTo", SUM_TO).with_step_through(
        |engine, args| {
            let n = engine.declare_param("n", VarType::Int, engine.arg(args, 0)?)?;
            let result = engine.declare_local("result", VarType::Int)?;
            let i = engine.declare_local("i", VarType::Int)?;
            engine.end_declarations()?;

            engine.highlight("int result = 0")?;
            engine.set(result, 0)?;
            engine.highlight("int i = 1")?;
            engine.set(i, 1)?;

            let limit = engine.value(n)?.expect_int()?;
            let (mut sum, mut counter) = (0, 1);
            while counter <= limit {
                engine.highlight("i <= n")?;
                engine.highlight_line_of("result += i")?;
                sum += counter;
                engine.set(result, sum)?;
                engine.highlight("i++")?;
                counter += 1;
                engine.set(i, counter)?;
            }
            engine.highlight("i <= n")?;

            engine.highlight_line_of("return result")?;
            Ok(Value::Int(sum))
        },
    ))?;

    let total = engine.call("sumTo", &[Value::Int(3)])?;
    engine.println(&format!("sumTo(3) = {}", total));
    Ok(engine)
}
