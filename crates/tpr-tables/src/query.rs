//! Column filter expressions
//!
//! Each column header carries a text box whose content is parsed into a
//! [`FilterExpr`]. The grammar is small:
//!
//! ```text
//! expression := "is blank" | "is nonblank"
//!             | operator operand
//!             | operand
//! operator   := "=" | "!=" | "<" | "<=" | ">" | ">="
//!             | "eq" | "ne" | "lt" | "le" | "gt" | "ge"
//!             | "contains" | "datestartswith"
//! operand    := quoted string | bare text
//! ```
//!
//! A bare operand without an operator means `=` when it is numeric and
//! `contains` otherwise. Filters for several columns combine into a single
//! query string of the form `{Cat} contains tariff && {Year} >= 2018`.

use crate::error::{GridError, Result};
use indexmap::IndexMap;
use nom::{
	IResult, Parser,
	branch::alt,
	bytes::complete::{is_not, tag, take_until},
	character::complete::{char, multispace0, multispace1, one_of},
	combinator::{all_consuming, map, not, recognize, rest, value, verify},
	multi::{many0, separated_list1},
	sequence::{delimited, preceded, terminated},
};
use std::cmp::Ordering;
use tpr_data::Cell;

/// Comparison applied by a column filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
	/// Equal
	Eq,
	/// Not equal
	Ne,
	/// Less than
	Lt,
	/// Less than or equal
	Le,
	/// Greater than
	Gt,
	/// Greater than or equal
	Ge,
	/// Case-sensitive substring
	Contains,
	/// Text prefix, intended for ISO dates
	DateStartsWith,
	/// Empty or whitespace-only cell
	IsBlank,
	/// Anything but a blank cell
	IsNonBlank,
}

impl FilterOperator {
	/// Canonical spelling
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Ne => "!=",
			Self::Lt => "<",
			Self::Le => "<=",
			Self::Gt => ">",
			Self::Ge => ">=",
			Self::Contains => "contains",
			Self::DateStartsWith => "datestartswith",
			Self::IsBlank => "is blank",
			Self::IsNonBlank => "is nonblank",
		}
	}
}

/// A parsed column filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
	/// Comparison to apply
	pub operator: FilterOperator,
	/// Right-hand side; empty for the blank checks
	pub operand: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Operand {
	text: String,
	quoted: bool,
}

impl FilterExpr {
	/// Creates an expression
	pub fn new(operator: FilterOperator, operand: impl Into<String>) -> Self {
		Self {
			operator,
			operand: operand.into(),
		}
	}

	/// Parses the text typed into a column header
	///
	/// # Errors
	///
	/// Returns [`GridError::InvalidFilter`] if the expression does not follow
	/// the grammar, e.g. an operator with no operand.
	pub fn parse(column: &str, expression: &str) -> Result<Self> {
		all_consuming(delimited(multispace0, filter_expression, multispace0))
			.parse(expression)
			.map(|(_, expr)| expr)
			.map_err(|_| GridError::InvalidFilter {
				column: column.to_string(),
				expression: expression.to_string(),
			})
	}

	/// Tests a cell against this expression
	pub fn matches(&self, cell: &Cell) -> bool {
		match self.operator {
			FilterOperator::Contains => cell.to_string().contains(&self.operand),
			FilterOperator::DateStartsWith => cell.to_string().starts_with(&self.operand),
			FilterOperator::IsBlank => cell.is_blank(),
			FilterOperator::IsNonBlank => !cell.is_blank(),
			FilterOperator::Eq => self.compare(cell) == Some(Ordering::Equal),
			FilterOperator::Ne => self.compare(cell) != Some(Ordering::Equal),
			FilterOperator::Lt => self.compare(cell) == Some(Ordering::Less),
			FilterOperator::Le => matches!(
				self.compare(cell),
				Some(Ordering::Less | Ordering::Equal)
			),
			FilterOperator::Gt => self.compare(cell) == Some(Ordering::Greater),
			FilterOperator::Ge => matches!(
				self.compare(cell),
				Some(Ordering::Greater | Ordering::Equal)
			),
		}
	}

	/// Orders `cell` relative to the operand
	///
	/// Numbers compare numerically, anything else lexicographically. Empty
	/// cells never compare.
	fn compare(&self, cell: &Cell) -> Option<Ordering> {
		if matches!(cell, Cell::Empty) {
			return None;
		}
		match (cell.as_f64(), self.operand.parse::<f64>().ok()) {
			(Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs),
			_ => Some(cell.to_string().as_str().cmp(self.operand.as_str())),
		}
	}
}

fn blank_check(input: &str) -> IResult<&str, FilterExpr> {
	map(
		preceded(
			(tag("is"), multispace1),
			alt((
				value(FilterOperator::IsNonBlank, tag("nonblank")),
				value(FilterOperator::IsBlank, tag("blank")),
			)),
		),
		|operator| FilterExpr::new(operator, ""),
	)
	.parse(input)
}

fn symbol_operator(input: &str) -> IResult<&str, FilterOperator> {
	terminated(
		alt((
			value(FilterOperator::Ge, tag(">=")),
			value(FilterOperator::Le, tag("<=")),
			value(FilterOperator::Ne, tag("!=")),
			value(FilterOperator::Eq, tag("=")),
			value(FilterOperator::Lt, tag("<")),
			value(FilterOperator::Gt, tag(">")),
		)),
		multispace0,
	)
	.parse(input)
}

fn word_operator(input: &str) -> IResult<&str, FilterOperator> {
	terminated(
		alt((
			value(FilterOperator::Contains, tag("contains")),
			value(FilterOperator::DateStartsWith, tag("datestartswith")),
			value(FilterOperator::Eq, tag("eq")),
			value(FilterOperator::Ne, tag("ne")),
			value(FilterOperator::Lt, tag("lt")),
			value(FilterOperator::Le, tag("le")),
			value(FilterOperator::Gt, tag("gt")),
			value(FilterOperator::Ge, tag("ge")),
		)),
		multispace1,
	)
	.parse(input)
}

fn quoted(input: &str) -> IResult<&str, Operand> {
	map(
		alt((
			delimited(char('"'), take_until("\""), char('"')),
			delimited(char('\''), take_until("'"), char('\'')),
			delimited(char('`'), take_until("`"), char('`')),
		)),
		|text: &str| Operand {
			text: text.to_string(),
			quoted: true,
		},
	)
	.parse(input)
}

fn bare(input: &str) -> IResult<&str, Operand> {
	let unquoted = |s: &str| {
		let s = s.trim();
		!s.is_empty() && !s.starts_with(['"', '\'', '`'])
	};
	map(verify(rest, unquoted), |s: &str| Operand {
		text: s.trim().to_string(),
		quoted: false,
	})
	.parse(input)
}

fn operand(input: &str) -> IResult<&str, Operand> {
	alt((terminated(quoted, multispace0), bare)).parse(input)
}

fn explicit(input: &str) -> IResult<&str, FilterExpr> {
	map(
		(alt((word_operator, symbol_operator)), operand),
		|(operator, operand)| FilterExpr::new(operator, operand.text),
	)
	.parse(input)
}

fn implicit(input: &str) -> IResult<&str, FilterExpr> {
	map(
		verify(operand, |o: &Operand| {
			o.quoted || !o.text.starts_with(['=', '<', '>', '!'])
		}),
		|operand| {
			let operator = if !operand.quoted && operand.text.parse::<f64>().is_ok() {
				FilterOperator::Eq
			} else {
				FilterOperator::Contains
			};
			FilterExpr::new(operator, operand.text)
		},
	)
	.parse(input)
}

fn filter_expression(input: &str) -> IResult<&str, FilterExpr> {
	alt((blank_check, explicit, implicit)).parse(input)
}

fn column_clause(input: &str) -> IResult<&str, (&str, &str)> {
	(
		preceded(multispace0, delimited(char('{'), is_not("}"), char('}'))),
		map(rest, str::trim),
	)
		.parse(input)
}

/// Text of one clause: quoted runs, plain text and lone `&`, up to `&&`
fn clause_text(input: &str) -> IResult<&str, &str> {
	recognize(many0(alt((
		recognize(quoted),
		is_not("&\"'`"),
		recognize(one_of("\"'`")),
		recognize(terminated(char('&'), not(char('&')))),
	))))
	.parse(input)
}

/// Splits a combined query on `&&` outside quoted operands
fn split_clauses(query: &str) -> Vec<&str> {
	separated_list1(tag("&&"), clause_text)
		.parse(query)
		.map(|(_, clauses)| clauses)
		.unwrap_or_else(|_| vec![query])
}

/// Parses a combined query into per-column raw expressions
///
/// Clauses that do not start with a `{column}` reference are dropped.
pub fn parse_filter_query(query: &str) -> IndexMap<String, String> {
	let mut filters = IndexMap::new();
	for clause in split_clauses(query) {
		if clause.trim().is_empty() {
			continue;
		}
		match column_clause(clause) {
			Ok((_, (column, expression))) => {
				filters.insert(column.to_string(), expression.to_string());
			}
			Err(_) => tracing::debug!(clause, "Dropping filter clause without column reference"),
		}
	}
	filters
}

/// Combines per-column raw expressions into one query string
pub fn format_filter_query(filters: &IndexMap<String, String>) -> String {
	filters
		.iter()
		.filter(|(_, expression)| !expression.trim().is_empty())
		.map(|(column, expression)| format!("{{{}}} {}", column, expression.trim()))
		.collect::<Vec<_>>()
		.join(" && ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("contains tariff", FilterOperator::Contains, "tariff")]
	#[case("tariff", FilterOperator::Contains, "tariff")]
	#[case("customs procedures", FilterOperator::Contains, "customs procedures")]
	#[case("2019", FilterOperator::Eq, "2019")]
	#[case("\"2019\"", FilterOperator::Contains, "2019")]
	#[case(">= 2018", FilterOperator::Ge, "2018")]
	#[case(">=2018", FilterOperator::Ge, "2018")]
	#[case("ne 'BRA'", FilterOperator::Ne, "BRA")]
	#[case("!= BRA", FilterOperator::Ne, "BRA")]
	#[case("lt 5", FilterOperator::Lt, "5")]
	#[case("datestartswith 2019-10", FilterOperator::DateStartsWith, "2019-10")]
	#[case("  is blank ", FilterOperator::IsBlank, "")]
	#[case("is nonblank", FilterOperator::IsNonBlank, "")]
	#[case("neptune", FilterOperator::Contains, "neptune")]
	#[case("= `a && b`", FilterOperator::Eq, "a && b")]
	fn test_parse_valid(
		#[case] input: &str,
		#[case] operator: FilterOperator,
		#[case] operand: &str,
	) {
		assert_eq!(
			FilterExpr::parse("Cat", input).unwrap(),
			FilterExpr::new(operator, operand)
		);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case(">=")]
	#[case("<= ")]
	#[case("= \"unterminated")]
	fn test_parse_invalid(#[case] input: &str) {
		assert!(matches!(
			FilterExpr::parse("Year", input),
			Err(GridError::InvalidFilter { .. })
		));
	}

	#[rstest]
	#[case("contains tariff", Cell::from("mfn tariff"), true)]
	#[case("contains Tariff", Cell::from("mfn tariff"), false)]
	#[case("> 2018", Cell::integer(2019), true)]
	#[case("> 2018", Cell::integer(2018), false)]
	#[case(">= 2018", Cell::integer(2018), true)]
	#[case("< 10", Cell::float(9.5), true)]
	#[case("= 2019", Cell::float(2019.0), true)]
	#[case("contains 007", Cell::parse("007"), true)]
	#[case("contains 1.50", Cell::parse("1.50"), true)]
	#[case("= 7", Cell::parse("007"), true)]
	#[case("!= BRA", Cell::from("USA"), true)]
	#[case("!= BRA", Cell::Empty, true)]
	#[case("= BRA", Cell::Empty, false)]
	#[case("> B", Cell::from("C"), true)]
	#[case("is blank", Cell::Empty, true)]
	#[case("is blank", Cell::from("  "), true)]
	#[case("is nonblank", Cell::integer(0), true)]
	#[case("datestartswith 2019", Cell::from("2019-10-11"), true)]
	fn test_matches(#[case] input: &str, #[case] cell: Cell, #[case] expected: bool) {
		let expr = FilterExpr::parse("Any", input).unwrap();
		assert_eq!(expr.matches(&cell), expected);
	}

	#[rstest]
	fn test_filter_query_round_trip() {
		let mut filters = IndexMap::new();
		filters.insert("Cat".to_string(), "contains tariff".to_string());
		filters.insert("Year".to_string(), ">= 2018".to_string());
		filters.insert("Text".to_string(), "  ".to_string());

		let query = format_filter_query(&filters);
		assert_eq!(query, "{Cat} contains tariff && {Year} >= 2018");

		let parsed = parse_filter_query(&query);
		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed["Cat"], "contains tariff");
		assert_eq!(parsed["Year"], ">= 2018");
	}

	#[rstest]
	fn test_parse_filter_query_respects_quotes_and_drops_junk() {
		let parsed = parse_filter_query("{Text} contains \"a && b\" && junk && {Country} KEN");
		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed["Text"], "contains \"a && b\"");
		assert_eq!(parsed["Country"], "KEN");
	}

	#[rstest]
	#[case("", vec![""])]
	#[case("{A} x && {B} y", vec!["{A} x ", " {B} y"])]
	#[case("{A} a & b", vec!["{A} a & b"])]
	#[case("{A} 'x && y' && {B} \"z", vec!["{A} 'x && y' ", " {B} \"z"])]
	#[case("{A} x &&", vec!["{A} x ", ""])]
	fn test_split_clauses(#[case] query: &str, #[case] expected: Vec<&str>) {
		assert_eq!(split_clauses(query), expected);
	}
}
