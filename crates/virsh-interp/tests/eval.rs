// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end evaluation tests.

use std::cell::RefCell;
use std::rc::Rc;

use virsh_interp::{
    root_scope, Completion, EvalError, Function, Interpreter, Lazy, Output, Reified, Scope, Value,
};

/// Root scope with a few bindings the programs below rely on.
fn fixture() -> Scope {
    let scope = root_scope(&Output::Buffer(Rc::new(RefCell::new(String::new()))));
    let bind = |scope: &Scope, name: &str, value: Value| scope.define(name, Lazy::ready(value));

    bind(&scope, "/a", Value::from("/A"));
    bind(&scope, "/switch", Value::from("on"));
    bind(&scope, "a", Value::from("A"));
    bind(&scope, "b", Value::Bool(false));
    bind(&scope, "n", Value::Num(1.0));

    let p = Scope::new();
    bind(&p, "name", Value::from("Jay"));
    bind(&p, "age", Value::Num(28.0));
    bind(&scope, "p", Value::Scope(p));

    let fs = Scope::new();
    let open = Function::native("open", 1, |_scope, _args| Ok(Completion::value("Hello")));
    bind(&fs, "open", Value::Function(open));
    bind(&scope, "fs", Value::Scope(fs));

    scope
}

fn pass(src: &str) -> Reified {
    Interpreter::with_scope(fixture())
        .eval(src)
        .unwrap_or_else(|e| panic!("{src}: {e}"))
}

fn fail(src: &str) -> EvalError {
    match Interpreter::with_scope(fixture()).eval(src) {
        Ok(out) => panic!("{src}: expected an error, got {out}"),
        Err(e) => e,
    }
}

/// Run with the stock builtins and return the result plus printed output.
fn run_captured(src: &str) -> (Reified, String) {
    let (interp, output) = Interpreter::with_captured_output();
    let out = interp.eval(src).unwrap_or_else(|e| panic!("{src}: {e}"));
    let printed = output.borrow().clone();
    (out, printed)
}

fn num(n: f64) -> Reified {
    Reified::Number(n)
}

fn text(s: &str) -> Reified {
    Reified::String(s.to_string())
}

fn list(items: Vec<Reified>) -> Reified {
    Reified::List(items)
}

// --- Literals and names ---

#[test]
fn literals_and_names() {
    assert_eq!(pass("1"), num(1.0));
    assert_eq!(pass("1.5"), num(1.5));
    assert_eq!(pass("\"Hello\""), text("Hello"));
    assert_eq!(pass("'it\\'s'"), text("it's"));
    assert_eq!(pass("a"), text("A"));
    assert_eq!(pass("/a"), text("/A"));
    assert_eq!(pass("true"), Reified::Bool(true));
}

#[test]
fn unknown_names_read_as_undefined() {
    assert_eq!(pass("nothing"), Reified::Absent);
    assert_eq!(pass("{i = 1}; i"), Reified::Absent);
    assert_eq!(pass("{i = 1; i}"), num(1.0));
}

// --- Assignment and postfix ---

#[test]
fn assignment_yields_the_value() {
    assert_eq!(pass("i = 1"), num(1.0));
    assert_eq!(pass("x = y = 3; x"), num(3.0));
    assert_eq!(pass("//okay = true;\n//okay!!"), Reified::Bool(true));
}

#[test]
fn postfix_returns_the_old_value() {
    assert_eq!(pass("b!!"), Reified::Bool(false));
    assert_eq!(pass("b!!; b"), Reified::Bool(true));
    assert_eq!(pass("b!!; b!!"), Reified::Bool(true));
    assert_eq!(pass("n++"), num(1.0));
    assert_eq!(pass("n++; n"), num(2.0));
    assert_eq!(pass("n--; n"), num(0.0));
    assert_eq!(pass("n++; {n++}; n"), num(3.0));
}

// --- Records and lookups ---

#[test]
fn looking_into_records() {
    assert_eq!(pass("p->name"), text("Jay"));
    assert_eq!(pass("p.age"), num(28.0));
    assert_eq!(pass("p->name = 1; p->name"), num(1.0));
    assert_eq!(pass("p->name = 1; p->name++; p->name"), num(2.0));
}

#[test]
fn record_literals() {
    assert_eq!(pass("{a: 1}").to_string(), "{a: 1}");
    assert_eq!(pass("{}").to_string(), "{}");
    assert_eq!(pass("x = {a: 1};\nx->a"), num(1.0));
    assert_eq!(
        pass("person = {\n    name: \"FOOFOO\",\n    age: 25\n}").to_string(),
        "{name: FOOFOO, age: 25}"
    );
    assert_eq!(
        pass(
            "person = {
                name: \"FOOFOO\",
                age: 25,
                job: {
                    location: \"SF\",
                    title: \"CXO\"
                }
            };
            person->job->title"
        ),
        text("CXO")
    );
    assert_eq!(pass("lamp = {\n    test: 'okay',\n    switch: /switch\n};\nlamp->switch"), text("on"));
}

#[test]
fn indexing() {
    assert_eq!(pass("person = (1, 2, 3);\nperson[0]"), num(1.0));
    assert_eq!(pass("(1, 2, 3)[2]"), num(3.0));
    assert_eq!(pass("(1, 2, 3)[3]"), Reified::Absent);
    assert_eq!(pass("(1, 2, 3)[1.5]"), Reified::Absent);
    assert_eq!(
        pass("person = {\n    job: {\n        skills: (\"Fast\", \"Smelly\")\n    }\n};\nperson->job->skills[0]"),
        text("Fast")
    );
    assert_eq!(pass("person = {};\nx = 'name';\nperson[x] = 'Kim';\nperson->name"), text("Kim"));
    assert_eq!(pass("person = {};\nperson['name'] = 'Kim';\nperson->name"), text("Kim"));
}

#[test]
fn record_fields_update_in_loops() {
    let src = "p = {\n    j: 0\n};\np->out = for i<- 1..10 {\n    p->j = p->j + i\n};\np.out";
    assert_eq!(pass(src), num(55.0));
}

// --- Control flow ---

#[test]
fn if_picks_a_branch() {
    assert_eq!(pass("if a { p->name }"), text("Jay"));
    assert_eq!(pass("if false { p->name } { p->age }"), num(28.0));
    assert_eq!(pass("if false { 1 }"), Reified::Absent);
    assert_eq!(pass("if false {\n    \"NOPE\"\n}\nelse {\n    \"OK\"\n}\n"), text("OK"));
    assert_eq!(pass("if true $\nif true 12 34\n"), num(12.0));
    assert_eq!(pass("if false\n{ if true 12 34 }\n40\n"), num(40.0));
    assert_eq!(pass("if true $\nif false 12 34\n"), num(34.0));
}

#[test]
fn untaken_branch_has_no_effect() {
    assert_eq!(pass("x = 0; if false { x = 1 } { x = 2 }; x"), num(2.0));
    let (_, printed) = run_captured("if true { print 'yes' } { print 'no' }");
    assert_eq!(printed, "yes\n");
}

#[test]
fn for_loops() {
    assert_eq!(pass("j = 0; for i <- 0..10 { j = i }; j"), num(10.0));
    assert_eq!(pass("j = 0; for i <- 0..10 { j = i }; i"), Reified::Absent);
    assert_eq!(pass("for i <- 0..10 { i }"), num(10.0));
    assert_eq!(pass("for i <- (1, 2, 3) { i }"), num(3.0));
    assert_eq!(pass("for i <- 1..0 { i }"), Reified::Absent);
    assert_eq!(pass("j = 0;\nfor i <- 1..10 {\n    j = i;\n    j++;\n    j\n}"), num(11.0));
    assert_eq!(
        pass("i = 0;\nfor j <- 1..99 {\n    i = i + j\n};\nif i > 10 {\n    i--\n};\ni\n"),
        num(4949.0)
    );
    assert_eq!(pass("i = 0;\nk = {\n    for j <- 1..99 {\n        j + i\n    }\n};\nk\n"), num(99.0));
}

#[test]
fn nested_loops() {
    let braced = "\nout = 0;\nfor j <- 1..10 {\nfor i <- 1..10 {\n    out = out + i + j\n}}";
    assert_eq!(pass(braced), num(1100.0));
    let dollar = "\nout = 0;\nfor j <- 1..10 $\nfor i <- 1..10 {\n    out = out + i + j\n}";
    assert_eq!(pass(dollar), num(1100.0));
}

#[test]
fn generators_outside_for() {
    let out = pass("g = i <- (7, 8); list (g i) (g i) (g i)");
    assert_eq!(out, list(vec![num(7.0), num(8.0), Reified::Absent]));
}

#[test]
fn with_enters_a_record() {
    assert_eq!(pass("\nsc = {name: 'jay'};\nwith sc {\n    name\n}\n"), text("jay"));
    assert_eq!(pass("\nwith {name: 'jay'} {\n    name\n}\n"), text("jay"));
}

// --- Lists and ranges ---

#[test]
fn lists_and_ranges() {
    assert_eq!(pass("0..1"), list(vec![num(0.0), num(1.0)]));
    assert_eq!(pass("0..10").to_string(), "[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]");
    assert_eq!(pass("(1, 2, 3)"), list(vec![num(1.0), num(2.0), num(3.0)]));
    assert_eq!(pass("(1,)"), list(vec![num(1.0)]));
    assert_eq!(pass("(1)"), num(1.0));
    assert_eq!(pass("\nhead (list 1 2 3)\n"), num(1.0));
    assert_eq!(pass("head (1..0)"), Reified::Absent);
}

#[test]
fn dollar_nests_the_rest_of_the_line() {
    assert_eq!(pass("list 2 $ list 3"), list(vec![num(2.0), list(vec![num(3.0)])]));
    let nested = list(vec![num(2.0), list(vec![num(3.0), list(vec![num(4.0)])])]);
    assert_eq!(pass("list 2 $ list 3 $ list 4"), nested);
    assert_eq!(pass("list 2 $ list 3 (list 4)"), nested);
    assert_eq!(pass("list 2 (list 3 (list 4))"), nested);
    assert_eq!(
        pass("list 2 (list 3) (list 4)"),
        list(vec![num(2.0), list(vec![num(3.0)]), list(vec![num(4.0)])])
    );
}

// --- Operators ---

#[test]
fn arithmetic() {
    assert_eq!(pass("1 + 2"), num(3.0));
    assert_eq!(pass("\"HELLO \" + \"WORLD\""), text("HELLO WORLD"));
    assert_eq!(pass("\"HELLO \" + 1"), text("HELLO 1"));
    assert_eq!(pass("1-1"), num(0.0));
    assert_eq!(pass("100 % 10"), num(0.0));
    assert_eq!(pass("121 % 9"), num(4.0));
}

#[test]
fn comparison() {
    assert_eq!(pass("1 < 10"), Reified::Bool(true));
    assert_eq!(pass("1 > 10"), Reified::Bool(false));
    assert_eq!(pass("a == 'A'"), Reified::Bool(true));
    assert_eq!(pass("1 == '1'"), Reified::Bool(false));
    assert_eq!(pass("'a' != 'b'"), Reified::Bool(true));
    assert_eq!(pass("(1, 2) == (1, 2)"), Reified::Bool(true));
    assert_eq!(pass("{a: 1} == {a: 1}"), Reified::Bool(true));
    assert_eq!(pass("!b"), Reified::Bool(true));
}

// --- Strings ---

#[test]
fn interpolation() {
    assert_eq!(pass("name = \"Foo\";\n\"Hello {name}\"\n"), text("Hello Foo"));
    assert_eq!(pass("person = {\n    name: \"Foo\"\n};\n\"Hello {person->name}\"\n"), text("Hello Foo"));
    assert_eq!(
        pass("person = {\n    name: \"Foo\",\n    age: 38\n};\n\"Hello {person->name} you are {person->age}\"\n"),
        text("Hello Foo you are 38")
    );
    assert_eq!(pass("\"{ {a: 1}->a } and {(1, 2)}\""), text("1 and [1, 2]"));
    assert_eq!(pass("out = ''; for i <- 1..3 { out = out + \"{i},\" }; out"), text("1,2,3,"));
}

// --- Functions ---

#[test]
fn lambdas() {
    assert_eq!(pass("add = a b => a + b; add 1 2"), num(3.0));
    assert_eq!(pass("add = (a, b) => a + b; add 'x' 'y'"), text("xy"));
    assert_eq!(pass("f = x => x; f"), Reified::Function);
    assert_eq!(pass("f = x y => y; f 1"), Reified::Absent);
    assert_eq!(pass("f = () => 42; f"), num(42.0));
}

#[test]
fn zero_arity_callee_runs_before_the_call() {
    assert_eq!(pass("mk = () => (x => x + 1); mk 5"), num(6.0));
    let (out, _) = run_captured("calls = 0; mk = () => { calls++; x => x }; mk 1; mk 2; calls");
    assert_eq!(out, num(2.0));
}

#[test]
fn closures_keep_their_scope() {
    let (out, _) = run_captured("make = () => { n = 0; () => n++ }; c = make; c; c");
    assert_eq!(out, num(1.0));
    let (out, _) = run_captured("x = 1; f = () => x; x = 5; f");
    assert_eq!(out, num(5.0));
}

#[test]
fn parameters_shadow_outer_names() {
    let (out, _) = run_captured("a = 1; f = a => a; f 2; a");
    assert_eq!(out, num(1.0));
}

#[test]
fn func_takes_a_record() {
    let (out, _) = run_captured("greet = func { \"Hi {name}\" }; greet {name: 'Jay'}");
    assert_eq!(out, text("Hi Jay"));
    let (out, _) = run_captured("count = func { total = total + step }; count {total: 1, step: 2}");
    assert_eq!(out, num(3.0));
}

#[test]
fn fs_namespace_is_plain_record_access() {
    assert_eq!(pass("fs.open \"file\""), text("Hello"));
}

// --- Output ---

#[test]
fn print_and_write() {
    let (out, printed) = run_captured("print 1 'two' (1, 2)");
    assert_eq!(out, Reified::Absent);
    assert_eq!(printed, "1\ntwo\n[1, 2]\n");

    let (_, printed) = run_captured("write 'a' 1; write 'b'");
    assert_eq!(printed, "a1b");
}

#[test]
fn arguments_are_evaluated_left_to_right() {
    let (_, printed) = run_captured("list (print 'a') (print 'b'); print \"{write 'c'}\"");
    assert_eq!(printed, "a\nb\ncundefined\n");
}

#[test]
fn state_persists_between_evaluations() {
    let (interp, _) = Interpreter::with_captured_output();
    interp.eval("n = 1").unwrap();
    assert_eq!(interp.eval("n++").unwrap(), num(1.0));
    assert_eq!(interp.eval("n").unwrap(), num(2.0));
    assert_eq!(interp.eval("(1, 2)").unwrap(), interp.eval("(1, 2)").unwrap());
}

// --- Errors ---

#[test]
fn error_kinds() {
    assert!(matches!(fail("1 = 2"), EvalError::InvalidAssignmentTarget(_)));
    assert!(matches!(fail("'a'++"), EvalError::InvalidAssignmentTarget(_)));
    assert!(matches!(fail("a++"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("1 < 'a'"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("a > 1"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("1 + 'a'"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("'a' - 1"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("true + 1"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("'a' % 2"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("5 2"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("b.c"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("1[0]"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("with 1 { a }"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("!1"), EvalError::TypeMismatch(_)));
    assert!(matches!(fail("for i <- 5 { i }"), EvalError::NotIterable(_)));
    assert!(matches!(fail("(+)"), EvalError::UnknownOperator(op) if op == "+"));
    assert!(matches!(fail("a = "), EvalError::Parse(_)));
    assert!(matches!(fail("\"{ 1 + }\""), EvalError::Parse(_)));
}

#[test]
fn failures_stop_evaluation() {
    let (interp, output) = Interpreter::with_captured_output();
    assert!(interp.eval("print 'before'; 1 < 'x'; print 'after'").is_err());
    assert_eq!(*output.borrow(), "before\n");
}

#[test]
fn deep_recursion_completes() {
    let src = "f = n => if (n > 0) { f (n - 1) } 0; f 1000";
    assert_eq!(pass(src), num(0.0));
}

#[test]
fn runaway_recursion_is_an_error() {
    let (interp, _) = Interpreter::with_captured_output();
    let err = interp.eval("f = n => f n; f 1").unwrap_err();
    assert!(matches!(err, EvalError::RecursionLimit(_)));
    assert!(err.to_string().contains("call depth limit"));
    // The depth count unwinds with the error.
    assert_eq!(interp.eval("f = n => if (n > 0) { f (n - 1) } n; f 10").unwrap(), num(0.0));
}

#[test]
fn error_messages() {
    assert_eq!(fail("1 = 2").to_string(), "invalid assignment target: 1");
    assert_eq!(fail("for i <- 5 { i }").to_string(), "Number is not iterable");
    assert_eq!(fail("(+)").to_string(), "unknown operator `+`");
}
