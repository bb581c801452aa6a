//! Integration tests for the statement and declaration grammar.

use ifjc_par::{Node, NodeKind, Parser};

/// Wraps statements in the mandatory program envelope, inside `main`.
fn program(body: &str) -> String {
    format!(
        "import \"ifj25\" for Ifj\nclass Program {{\nstatic main() {{\n{}\n}}\n}}\n",
        body
    )
}

fn parse(source: &str) -> Node {
    Parser::new(source)
        .expect("lexing the first token")
        .parse_program()
        .expect("program should parse")
}

fn parse_err(source: &str) -> ifjc_util::CompileError {
    match Parser::new(source).and_then(|mut p| p.parse_program()) {
        Ok(_) => panic!("program should not parse"),
        Err(e) => e,
    }
}

/// Returns the body block of the first function definition.
fn main_block(root: &Node) -> &Node {
    let class = root.child(1).expect("class");
    let functions = class.child(1).expect("function list");
    let def = functions.child(0).expect("a function definition");
    let kind = def.child(1).expect("function kind");
    kind.child(1).expect("body block")
}

#[test]
fn test_program_shape() {
    let root = parse(&program("return 0"));
    assert_eq!(root.kind, NodeKind::Program);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].kind, NodeKind::Prolog);
    assert_eq!(root.children[1].kind, NodeKind::Class);
}

#[test]
fn test_prolog_children() {
    let root = parse(&program("return 0"));
    let prolog = &root.children[0];
    assert_eq!(prolog.children[0].kind, NodeKind::Literal);
    assert_eq!(prolog.children[0].text(), "ifj25");
    assert_eq!(prolog.children[1].kind, NodeKind::Identifier);
    assert_eq!(prolog.children[1].text(), "Ifj");
}

#[test]
fn test_prolog_allows_newlines_at_the_marked_spots() {
    let source =
        "import\n\"ifj25\" for\nIfj\nclass Program {\nstatic main() {\nreturn 0\n}\n}\n";
    parse(source);
}

#[test]
fn test_empty_class() {
    let root = parse("import \"ifj25\" for Ifj\nclass Program {\n}\n");
    let class = &root.children[1];
    assert_eq!(class.children[0].text(), "Program");
    assert_eq!(class.children[1].kind, NodeKind::Functions);
    assert!(class.children[1].children.is_empty());
}

#[test]
fn test_function_def_shape() {
    let source = "import \"ifj25\" for Ifj\nclass Program {\nstatic add(a, b) {\nreturn a + b\n}\n}\n";
    let root = parse(source);
    let def = &root.children[1].children[1].children[0];
    assert_eq!(def.kind, NodeKind::FunctionDef);
    assert_eq!(def.children[0].text(), "add");

    let function = &def.children[1];
    assert_eq!(function.kind, NodeKind::Function);
    let params = &function.children[0];
    assert_eq!(params.kind, NodeKind::ParamList);
    assert_eq!(params.children.len(), 2);
    assert_eq!(params.children[0].text(), "a");
    assert_eq!(params.children[1].text(), "b");
    assert_eq!(function.children[1].kind, NodeKind::Block);
}

#[test]
fn test_getter_and_setter() {
    let source = "import \"ifj25\" for Ifj\nclass Program {\nstatic value {\nreturn 1\n}\nstatic value = (v) {\nreturn v\n}\n}\n";
    let root = parse(source);
    let functions = &root.children[1].children[1];

    let getter = &functions.children[0].children[1];
    assert_eq!(getter.kind, NodeKind::Getter);
    assert_eq!(getter.children[0].kind, NodeKind::Block);

    let setter = &functions.children[1].children[1];
    assert_eq!(setter.kind, NodeKind::Setter);
    assert_eq!(setter.children[0].text(), "v");
    assert_eq!(setter.children[1].kind, NodeKind::Block);
}

#[test]
fn test_return_expression_shape() {
    // Scenario: return 1 + 2 * 3; — EXPR('+') with LITERAL 1 and EXPR('*').
    let root = parse(&program("return 1 + 2 * 3;"));
    let block = main_block(&root);
    let ret = &block.children[0];
    assert_eq!(ret.kind, NodeKind::Return);

    let expr = &ret.children[0];
    assert_eq!(expr.kind, NodeKind::Expr);
    assert_eq!(expr.text(), "+");
    assert_eq!(expr.children[0].kind, NodeKind::Literal);
    assert_eq!(expr.children[0].text(), "1");
    assert_eq!(expr.children[1].text(), "*");
}

#[test]
fn test_var_decl_with_initializer_shape() {
    // Scenario: var a = (1 + 2) * 3 — VAR_DECL(a) -> ASSIGN -> EXPR('*').
    let root = parse(&program("var a = (1 + 2) * 3"));
    let block = main_block(&root);
    let decl = &block.children[0];
    assert_eq!(decl.kind, NodeKind::VarDecl);
    assert_eq!(decl.text(), "a");

    let assign = &decl.children[0];
    assert_eq!(assign.kind, NodeKind::Assign);
    assert!(assign.token.is_none());

    let expr = &assign.children[0];
    assert_eq!(expr.text(), "*");
    assert_eq!(expr.children[0].text(), "+");
    assert_eq!(expr.children[1].text(), "3");
}

#[test]
fn test_var_decl_without_initializer() {
    let root = parse(&program("var a"));
    let decl = &main_block(&root).children[0];
    assert_eq!(decl.kind, NodeKind::VarDecl);
    assert!(decl.children.is_empty());
}

#[test]
fn test_if_else_siblings() {
    let root = parse(&program("if (a < b) {\nreturn 1\n} else {\nreturn 2\n}"));
    let block = main_block(&root);
    assert_eq!(block.children.len(), 2);

    let if_node = &block.children[0];
    assert_eq!(if_node.kind, NodeKind::If);
    assert_eq!(if_node.children[0].text(), "<");
    assert_eq!(if_node.children[1].kind, NodeKind::Block);

    let else_node = &block.children[1];
    assert_eq!(else_node.kind, NodeKind::Else);
    assert_eq!(else_node.children[0].kind, NodeKind::Block);
}

#[test]
fn test_while_shape() {
    let root = parse(&program("while (x > 0) {\nx = x - 1\n}"));
    let while_node = &main_block(&root).children[0];
    assert_eq!(while_node.kind, NodeKind::While);
    assert_eq!(while_node.children[0].text(), ">");
    assert_eq!(while_node.children[1].kind, NodeKind::Block);
}

#[test]
fn test_assignment_statement() {
    let root = parse(&program("x = 1 + 2"));
    let assign = &main_block(&root).children[0];
    assert_eq!(assign.kind, NodeKind::Assign);
    assert_eq!(assign.text(), "x");
    assert_eq!(assign.children[0].text(), "+");
}

#[test]
fn test_gid_assignment_statement() {
    let root = parse(&program("__total = 0"));
    let assign = &main_block(&root).children[0];
    assert_eq!(assign.kind, NodeKind::Assign);
    assert_eq!(assign.text(), "__total");
}

#[test]
fn test_call_statement() {
    let root = parse(&program("foo(1, x, \"s\")"));
    let call = &main_block(&root).children[0];
    assert_eq!(call.kind, NodeKind::Call);
    assert_eq!(call.text(), "foo");
    assert_eq!(call.children.len(), 3);
}

#[test]
fn test_builtin_call_statement() {
    // Scenario: Ifj.write("hi", 42) — CALL with FUNC_NAME first child.
    let root = parse(&program("Ifj.write(\"hi\", 42)"));
    let call = &main_block(&root).children[0];
    assert_eq!(call.kind, NodeKind::Call);
    assert!(call.token.is_none());

    let func_name = &call.children[0];
    assert_eq!(func_name.kind, NodeKind::FuncName);
    assert_eq!(func_name.children[0].text(), "Ifj");
    assert_eq!(func_name.children[1].text(), "write");

    assert_eq!(call.children.len(), 3);
    assert_eq!(call.children[1].kind, NodeKind::Literal);
    assert_eq!(call.children[2].text(), "42");
}

#[test]
fn test_builtin_call_as_initializer() {
    let root = parse(&program("var x = Ifj.readInt()"));
    let decl = &main_block(&root).children[0];
    let assign = &decl.children[0];
    let call = &assign.children[0];
    assert_eq!(call.kind, NodeKind::Call);
    assert_eq!(call.children[0].kind, NodeKind::FuncName);
}

#[test]
fn test_argument_list_continues_after_comma_newline() {
    let root = parse(&program("foo(1,\n2)"));
    let call = &main_block(&root).children[0];
    assert_eq!(call.children.len(), 2);
}

#[test]
fn test_missing_prolog_is_syntax_error() {
    let err = parse_err("class Program {\n}\n");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_wrong_class_name_is_syntax_error() {
    let err = parse_err("import \"ifj25\" for Ifj\nclass Main {\n}\n");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_missing_else_is_syntax_error() {
    let err = parse_err(&program("if (1 < 2) {\nreturn 1\n}"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_unexpected_else_is_syntax_error() {
    let err = parse_err(&program("else {\nreturn 1\n}"));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("unexpected 'else'"));
}

#[test]
fn test_statement_requires_newline() {
    let err = parse_err("import \"ifj25\" for Ifj\nclass Program {\nstatic main() {\nvar a = 1 var b = 2\n}\n}\n");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_lexical_error_has_code_1() {
    let err = parse_err(&program("var a = 0x"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_return_null_literal() {
    let root = parse(&program("return null"));
    let ret = &main_block(&root).children[0];
    assert_eq!(ret.kind, NodeKind::Return);
    assert_eq!(ret.children[0].kind, NodeKind::Literal);
    assert_eq!(ret.children[0].text(), "null");
}

#[test]
fn test_return_type_name_literals() {
    // The type names are plain operands, valid wherever an expression
    // can start.
    for word in ["Num", "String", "Null"] {
        let root = parse(&program(&format!("return {word};")));
        let ret = &main_block(&root).children[0];
        assert_eq!(ret.children.len(), 1, "return {word} should carry a value");
        assert_eq!(ret.children[0].kind, NodeKind::Literal);
        assert_eq!(ret.children[0].text(), word);
    }
}

#[test]
fn test_bare_identifier_statement() {
    let root = parse(&program("x"));
    let stmt = &main_block(&root).children[0];
    assert_eq!(stmt.kind, NodeKind::Identifier);
    assert_eq!(stmt.text(), "x");
}
