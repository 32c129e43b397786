//! Parser tests.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Scanner, Token, TokenKind};
use crate::parser::Parser;

fn parse(source: &str) -> Result<Vec<Stmt>, ParserError> {
    let tokens = Scanner::new(source).scan_tokens()?;
    match Parser::new(tokens).parse()?.kind {
        StmtKind::Compound(statements) => Ok(statements),
        other => panic!("Expected compound root, got {:?}", other),
    }
}

fn parse_one(source: &str) -> Stmt {
    parse(source).unwrap().into_iter().next().unwrap()
}

#[test]
fn test_precedence() {
    // 1 + 2 * 3 should parse as 1 + (2 * 3)
    let stmt = parse_one("1 + 2 * 3\n");
    match stmt.kind {
        StmtKind::Arithmetic {
            operator: ArithOp::Add,
            right,
            ..
        } => match right.kind {
            StmtKind::Arithmetic {
                operator: ArithOp::Mult,
                ..
            } => {}
            _ => panic!("Expected multiply on right"),
        },
        _ => panic!("Expected add at top"),
    }
}

#[test]
fn test_arithmetic_is_left_associative() {
    // 8 - 2 - 1 should parse as (8 - 2) - 1
    let stmt = parse_one("8 - 2 - 1\n");
    match stmt.kind {
        StmtKind::Arithmetic {
            operator: ArithOp::Sub,
            left,
            right,
        } => {
            assert!(matches!(left.kind, StmtKind::Arithmetic { .. }));
            assert!(matches!(right.kind, StmtKind::Literal(Literal::Number(1))));
        }
        _ => panic!("Expected subtraction"),
    }
}

#[test]
fn test_unary_minus_is_subtraction_from_zero() {
    let stmt = parse_one("-x\n");
    match stmt.kind {
        StmtKind::Arithmetic {
            operator: ArithOp::Sub,
            left,
            right,
        } => {
            assert!(matches!(left.kind, StmtKind::Literal(Literal::Number(0))));
            assert!(matches!(right.kind, StmtKind::VariableValue(_)));
        }
        _ => panic!("Expected 0 - x"),
    }
}

#[test]
fn test_logical_precedence() {
    // a or b and not c should parse as a or (b and (not c))
    let stmt = parse_one("a or b and not c\n");
    match stmt.kind {
        StmtKind::Logical {
            operator: LogicalOp::Or,
            right,
            ..
        } => match right.kind {
            StmtKind::Logical {
                operator: LogicalOp::And,
                right,
                ..
            } => assert!(matches!(right.kind, StmtKind::Not(_))),
            _ => panic!("Expected and on right"),
        },
        _ => panic!("Expected or at top"),
    }
}

#[test]
fn test_comparison_operators() {
    let cases = [
        ("a == b\n", Comparator::Equal),
        ("a != b\n", Comparator::NotEqual),
        ("a < b\n", Comparator::Less),
        ("a > b\n", Comparator::Greater),
        ("a <= b\n", Comparator::LessOrEqual),
        ("a >= b\n", Comparator::GreaterOrEqual),
    ];
    for (source, expected) in cases {
        match parse_one(source).kind {
            StmtKind::Comparison { operator, .. } => assert_eq!(operator, expected),
            other => panic!("Expected comparison for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_assignment_and_field_assignment() {
    match parse_one("x = 1\n").kind {
        StmtKind::Assignment { name, .. } => assert_eq!(name, "x"),
        _ => panic!("Expected assignment"),
    }
    match parse_one("a.b.c = 1\n").kind {
        StmtKind::FieldAssignment { object, field, .. } => {
            assert_eq!(object, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(field, "c");
        }
        _ => panic!("Expected field assignment"),
    }
}

#[test]
fn test_dotted_method_call() {
    match parse_one("a.b.m(1, 2)\n").kind {
        StmtKind::MethodCall {
            object,
            method,
            arguments,
        } => {
            assert_eq!(method, "m");
            assert_eq!(arguments.len(), 2);
            match object.kind {
                StmtKind::VariableValue(path) => {
                    assert_eq!(path, vec!["a".to_string(), "b".to_string()])
                }
                _ => panic!("Expected variable receiver"),
            }
        }
        _ => panic!("Expected method call"),
    }
}

#[test]
fn test_print_arguments() {
    match parse_one("print 1, \"a\", True\n").kind {
        StmtKind::Print(arguments) => assert_eq!(arguments.len(), 3),
        _ => panic!("Expected print"),
    }
    match parse_one("print\n").kind {
        StmtKind::Print(arguments) => assert!(arguments.is_empty()),
        _ => panic!("Expected print"),
    }
}

#[test]
fn test_print_call_form() {
    match parse_one("print(1, \"a\", True)\n").kind {
        StmtKind::Print(arguments) => assert_eq!(arguments.len(), 3),
        _ => panic!("Expected print"),
    }
    match parse_one("print()\n").kind {
        StmtKind::Print(arguments) => assert!(arguments.is_empty()),
        _ => panic!("Expected print"),
    }
    // Parentheses that open an expression are not an argument list
    match parse_one("print (1 + 2) * 3, 4\n").kind {
        StmtKind::Print(arguments) => {
            assert_eq!(arguments.len(), 2);
            assert!(matches!(
                arguments[0].kind,
                StmtKind::Arithmetic {
                    operator: ArithOp::Mult,
                    ..
                }
            ));
        }
        _ => panic!("Expected print"),
    }
}

#[test]
fn test_advance_stays_on_eof() {
    let mut parser = Parser::new(vec![Token::eof(0, 1, 1)]);
    assert_eq!(parser.advance().kind, TokenKind::Eof);
    assert_eq!(parser.advance().kind, TokenKind::Eof);
    assert_eq!(parser.peek().kind, TokenKind::Eof);
}

#[test]
fn test_str_call() {
    assert!(matches!(
        parse_one("str(1)\n").kind,
        StmtKind::Stringify(_)
    ));
}

#[test]
fn test_class_definition() {
    let source = "\
class Point:
  def __init__(self, x, y):
    self.x = x
    self.y = y
  def norm():
    return self.x * self.x + self.y * self.y
";
    match parse_one(source).kind {
        StmtKind::ClassDefinition(class) => {
            assert_eq!(class.name(), "Point");
            assert!(class.parent().is_none());
            // The leading `self` parameter is implicit.
            assert_eq!(class.find_method("__init__", 2).map(|m| m.arity()), Some(2));
            assert!(class.find_method("norm", 0).is_some());
            let body = &class.find_method("norm", 0).unwrap().body;
            assert!(matches!(body.kind, StmtKind::MethodBody(_)));
        }
        _ => panic!("Expected class definition"),
    }
}

#[test]
fn test_inheritance_and_instantiation() {
    let source = "\
class A:
  def f():
    return 1
class B(A):
  def g():
    return 2
b = B()
";
    let statements = parse(source).unwrap();
    assert_eq!(statements.len(), 3);
    let parent = match &statements[1].kind {
        StmtKind::ClassDefinition(class) => class.parent().map(|p| p.name().to_string()),
        _ => panic!("Expected class definition"),
    };
    assert_eq!(parent.as_deref(), Some("A"));
    match &statements[2].kind {
        StmtKind::Assignment { value, .. } => match &value.kind {
            StmtKind::NewInstance { class, arguments } => {
                assert_eq!(class.name(), "B");
                assert!(arguments.is_empty());
                assert!(class.get().is_some());
            }
            _ => panic!("Expected instantiation"),
        },
        _ => panic!("Expected assignment"),
    }
}

#[test]
fn test_method_may_instantiate_its_own_class() {
    let source = "\
class Node:
  def copy():
    return Node()
";
    assert!(parse(source).is_ok());
}

#[test]
fn test_if_else() {
    let source = "\
if x > 1:
  print 1
else:
  print 2
print 3
";
    let statements = parse(source).unwrap();
    assert_eq!(statements.len(), 2);
    match &statements[0].kind {
        StmtKind::IfElse { else_branch, .. } => assert!(else_branch.is_some()),
        _ => panic!("Expected if/else"),
    }
}

#[test]
fn test_unknown_class_is_rejected() {
    let result = parse("x = Missing()\n");
    assert!(matches!(result, Err(ParserError::UnknownClass(ref name, _)) if name == "Missing"));

    let result = parse("class B(A):\n  def f():\n    return 1\n");
    assert!(matches!(result, Err(ParserError::UnknownClass(ref name, _)) if name == "A"));
}

#[test]
fn test_duplicate_class_is_rejected() {
    let source = "\
class A:
  def f():
    return 1
class A:
  def g():
    return 2
";
    assert!(matches!(parse(source), Err(ParserError::DuplicateClass(..))));
}

#[test]
fn test_top_level_def_is_rejected() {
    assert!(matches!(
        parse("def f():\n  return 1\n"),
        Err(ParserError::General { .. })
    ));
}

#[test]
fn test_top_level_return_parses() {
    match parse_one("return 1\n").kind {
        StmtKind::Return(_) => {}
        _ => panic!("Expected return"),
    }
}

#[test]
fn test_chained_comparison_is_rejected() {
    assert!(matches!(
        parse("a < b < c\n"),
        Err(ParserError::UnexpectedToken { .. })
    ));
}
