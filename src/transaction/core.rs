//! Defines the core data models, request validation and table schema for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A movement of money, either into (inflow) or out of (outflow) the account.
///
/// The amount is always positive, the direction is given by [Transaction::tipo].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub descricao: String,
    /// The amount of money that moved. Always greater than zero.
    #[serde(serialize_with = "serialize_amount")]
    pub valor: f64,
    /// Whether the money came in or went out.
    pub tipo: TransactionKind,
    /// When the transaction was recorded, assigned by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub data_transacao: OffsetDateTime,
}

/// The direction of a [Transaction].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary.
    Entrada,
    /// Money going out, e.g. rent.
    Saida,
}

impl TransactionKind {
    /// The literal used for this kind in JSON bodies and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Entrada => "entrada",
            TransactionKind::Saida => "saida",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string was not one of the transaction kind literals.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("\"{0}\" is not a valid transaction kind")]
pub struct ParseTransactionKindError(String);

impl FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrada" => Ok(TransactionKind::Entrada),
            "saida" => Ok(TransactionKind::Saida),
            other => Err(ParseTransactionKindError(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// The client supplied fields of a transaction, after validation.
///
/// Create one from a request body with [validate_transaction_body].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A non-empty description.
    pub descricao: String,
    /// An amount strictly greater than zero.
    pub valor: f64,
    /// Whether the money came in or went out.
    pub tipo: TransactionKind,
}

/// Serialize an amount of money, writing whole amounts without a fractional part.
///
/// `1000.0` is written as `1000` so that clients get back the number they sent.
pub fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Above 2^53 not every integer is representable, leave those as floats.
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

    if amount.fract() == 0.0 && amount.abs() < MAX_SAFE_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

const REQUIRED_FIELDS_MESSAGE: &str = "Os campos descricao, valor e tipo são obrigatórios";

/// Check the shape of a JSON request body for creating or updating a transaction.
///
/// All three fields must be present and truthy (not `null`, `false`, `0` or
/// `""`). `valor` must be a JSON number greater than zero, numeric strings are
/// not accepted. `tipo` must be exactly `"entrada"` or `"saida"`.
///
/// # Errors
/// Returns [Error::InvalidTransaction] describing the first failed check.
pub fn validate_transaction_body(body: &Value) -> Result<NewTransaction, Error> {
    let fields = body.as_object().ok_or_else(|| {
        Error::InvalidTransaction("O corpo da requisição deve ser um objeto JSON".to_owned())
    })?;

    let descricao = required_field(fields, "descricao")?;
    let valor = required_field(fields, "valor")?;
    let tipo = required_field(fields, "tipo")?;

    let descricao = descricao
        .as_str()
        .ok_or_else(|| Error::InvalidTransaction("O campo descricao deve ser um texto".to_owned()))?;

    let valor = match valor {
        Value::Number(number) => number.as_f64().filter(|valor| *valor > 0.0),
        _ => None,
    }
    .ok_or_else(|| {
        Error::InvalidTransaction("O campo valor deve ser um número maior que zero".to_owned())
    })?;

    let tipo = tipo
        .as_str()
        .and_then(|tipo| tipo.parse::<TransactionKind>().ok())
        .ok_or_else(|| {
            Error::InvalidTransaction("O campo tipo deve ser 'entrada' ou 'saida'".to_owned())
        })?;

    Ok(NewTransaction {
        descricao: descricao.to_owned(),
        valor,
        tipo,
    })
}

fn required_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a Value, Error> {
    fields
        .get(name)
        .filter(|value| is_truthy(value))
        .ok_or_else(|| Error::InvalidTransaction(REQUIRED_FIELDS_MESSAGE.to_owned()))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected for a [Transaction], in the order [map_transaction_row] expects.
pub const TRANSACTION_COLUMNS: &str = "id, descricao, valor, tipo, data_transacao";

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transacoes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                descricao TEXT NOT NULL CHECK (length(descricao) > 0),
                valor REAL NOT NULL CHECK (valor > 0),
                tipo TEXT NOT NULL CHECK (tipo IN ('entrada', 'saida')),
                data_transacao TEXT NOT NULL
                    DEFAULT (strftime('%Y-%m-%d %H:%M:%f+00:00', 'now'))
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transacoes_data ON transacoes(data_transacao);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let descricao = row.get(1)?;
    let valor = row.get(2)?;
    let tipo = row.get(3)?;
    let data_transacao = row.get(4)?;

    Ok(Transaction {
        id,
        descricao,
        valor,
        tipo,
        data_transacao,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use serde_json::json;

    use crate::{
        Error,
        transaction::{NewTransaction, TransactionKind, validate_transaction_body},
    };

    #[track_caller]
    fn assert_rejected(body: serde_json::Value) {
        let result = validate_transaction_body(&body);

        assert!(
            matches!(result, Err(Error::InvalidTransaction(_))),
            "want body {body} to be rejected, got {result:?}"
        );
    }

    #[test]
    fn accepts_valid_body() {
        let body = json!({"descricao": "salario", "valor": 1000, "tipo": "entrada"});

        let got = validate_transaction_body(&body);

        assert_eq!(
            got,
            Ok(NewTransaction {
                descricao: "salario".to_owned(),
                valor: 1000.0,
                tipo: TransactionKind::Entrada,
            })
        );
    }

    #[test]
    fn accepts_fractional_amount() {
        let body = json!({"descricao": "cafe", "valor": 4.5, "tipo": "saida"});

        let got = validate_transaction_body(&body).unwrap();

        assert_eq!(got.valor, 4.5);
        assert_eq!(got.tipo, TransactionKind::Saida);
    }

    #[test]
    fn ignores_extra_fields() {
        let body = json!({
            "descricao": "aluguel",
            "valor": 400,
            "tipo": "saida",
            "id": 99,
        });

        assert!(validate_transaction_body(&body).is_ok());
    }

    #[test]
    fn rejects_non_object_body() {
        assert_rejected(json!([]));
        assert_rejected(json!("descricao"));
        assert_rejected(json!(null));
    }

    #[test]
    fn rejects_missing_fields() {
        assert_rejected(json!({"valor": 10, "tipo": "entrada"}));
        assert_rejected(json!({"descricao": "x", "tipo": "entrada"}));
        assert_rejected(json!({"descricao": "x", "valor": 10}));
    }

    #[test]
    fn rejects_falsy_fields() {
        assert_rejected(json!({"descricao": "", "valor": 10, "tipo": "entrada"}));
        assert_rejected(json!({"descricao": null, "valor": 10, "tipo": "entrada"}));
        assert_rejected(json!({"descricao": "x", "valor": 10, "tipo": false}));
        assert_rejected(json!({"descricao": "x", "valor": 10, "tipo": ""}));
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        assert_rejected(json!({"descricao": "x", "valor": 0, "tipo": "entrada"}));
        assert_rejected(json!({"descricao": "x", "valor": 0.0, "tipo": "entrada"}));
        assert_rejected(json!({"descricao": "x", "valor": -5, "tipo": "saida"}));
        assert_rejected(json!({"descricao": "x", "valor": -0.01, "tipo": "saida"}));
    }

    #[test]
    fn rejects_numeric_string_amount() {
        assert_rejected(json!({"descricao": "x", "valor": "10", "tipo": "entrada"}));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        assert_rejected(json!({"descricao": "x", "valor": true, "tipo": "entrada"}));
        assert_rejected(json!({"descricao": "x", "valor": [10], "tipo": "entrada"}));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_rejected(json!({"descricao": "x", "valor": 10, "tipo": "transferencia"}));
        assert_rejected(json!({"descricao": "x", "valor": 10, "tipo": "Entrada"}));
        assert_rejected(json!({"descricao": "x", "valor": 10, "tipo": 1}));
    }

    #[test]
    fn rejects_non_text_description() {
        assert_rejected(json!({"descricao": 42, "valor": 10, "tipo": "entrada"}));
    }
}
