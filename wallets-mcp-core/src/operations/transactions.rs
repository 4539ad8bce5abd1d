use kanau::processor::Processor;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use wallets_mcp_sdk::client::ClientError;
use wallets_mcp_sdk::objects::{
    InitiationVia, PageInfo, Transaction, TransactionDirection, TransactionPage,
    TransactionStatus, WalletCurrency,
};

use crate::error::OperationError;
use crate::framework::BlinkProcessor;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

const TRANSACTIONS_QUERY: &str = r#"
query TransactionsByWalletId($walletId: WalletId!, $first: Int, $after: String) {
  me {
    defaultAccount {
      walletById(walletId: $walletId) {
        transactions(first: $first, after: $after) {
          pageInfo {
            hasNextPage
            hasPreviousPage
            startCursor
            endCursor
          }
          edges {
            node {
              id
              status
              direction
              memo
              createdAt
              settlementAmount
              settlementCurrency
              settlementDisplayAmount
              initiationVia {
                ... on InitiationViaLn {
                  paymentHash
                }
                ... on InitiationViaOnChain {
                  address
                }
                ... on InitiationViaIntraLedger {
                  counterPartyUsername
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const FAILED: &str = "Failed to get transactions from Blink";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Variables<'a> {
    wallet_id: &'a str,
    first: u32,
    after: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TransactionsData {
    me: Me,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Me {
    default_account: DefaultAccount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefaultAccount {
    wallet_by_id: WalletById,
}

#[derive(Debug, Deserialize)]
struct WalletById {
    transactions: Connection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection {
    page_info: PageInfo,
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Node,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Node {
    id: String,
    status: TransactionStatus,
    direction: TransactionDirection,
    memo: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    created_at: OffsetDateTime,
    settlement_amount: i64,
    settlement_currency: WalletCurrency,
    settlement_display_amount: String,
    initiation_via: RawInitiationVia,
}

/// The flattened `InitiationVia` union: only the fields of the matching
/// fragment are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInitiationVia {
    payment_hash: Option<String>,
    address: Option<String>,
    /// Outer `Some` when the key is present, inner value may be `null`.
    #[serde(default, deserialize_with = "present")]
    counter_party_username: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TryFrom<RawInitiationVia> for InitiationVia {
    type Error = ClientError;

    /// Payment hash wins over address, address wins over intra-ledger.
    fn try_from(raw: RawInitiationVia) -> Result<Self, Self::Error> {
        if let Some(payment_hash) = raw.payment_hash {
            Ok(InitiationVia::Lightning { payment_hash })
        } else if let Some(address) = raw.address {
            Ok(InitiationVia::OnChain { address })
        } else if let Some(counter_party_username) = raw.counter_party_username {
            Ok(InitiationVia::IntraLedger {
                counter_party_username,
            })
        } else {
            Err(ClientError::Format(
                "unrecognized transaction initiation method".to_string(),
            ))
        }
    }
}

impl TryFrom<Node> for Transaction {
    type Error = ClientError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: node.id,
            status: node.status,
            direction: node.direction,
            memo: node.memo,
            created_at: node.created_at,
            settlement_amount: node.settlement_amount,
            settlement_currency: node.settlement_currency,
            settlement_display_amount: node.settlement_display_amount,
            initiation_via: node.initiation_via.try_into()?,
        })
    }
}

/// Fetch one page of a wallet's transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTransactions {
    pub wallet_id: String,
    /// Page size, [`DEFAULT_PAGE_SIZE`] when `None`.
    pub first: Option<u32>,
    /// `endCursor` of the previous page.
    pub after: Option<String>,
}

impl Processor<GetTransactions> for BlinkProcessor {
    type Output = TransactionPage;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:GetTransactions", fields(wallet_id = %query.wallet_id))]
    async fn process(&self, query: GetTransactions) -> Result<TransactionPage, OperationError> {
        let variables = Variables {
            wallet_id: &query.wallet_id,
            first: query.first.unwrap_or(DEFAULT_PAGE_SIZE),
            after: query.after.as_deref(),
        };

        let data: TransactionsData = self
            .client
            .execute(TRANSACTIONS_QUERY, &variables)
            .await
            .map_err(OperationError::wrap(FAILED))?;

        let connection = data.me.default_account.wallet_by_id.transactions;
        let transactions = connection
            .edges
            .into_iter()
            .map(|edge| Transaction::try_from(edge.node))
            .collect::<Result<Vec<_>, _>>()
            .map_err(OperationError::wrap(FAILED))?;

        Ok(TransactionPage {
            transactions,
            page_info: connection.page_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::operations::testing::processor_for;
    use serde_json::{Value, json};
    use wallets_mcp_sdk::mock::MockUpstream;

    fn raw(value: Value) -> RawInitiationVia {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_payment_hash_selects_lightning_regardless_of_other_fields() {
        let via = InitiationVia::try_from(raw(json!({
            "paymentHash": "hash1",
            "address": "bc1qignored",
            "counterPartyUsername": "bob"
        })))
        .unwrap();
        assert_eq!(
            via,
            InitiationVia::Lightning {
                payment_hash: "hash1".to_string()
            }
        );
    }

    #[test]
    fn test_address_selects_onchain() {
        let via = InitiationVia::try_from(raw(json!({"address": "bc1qxyz"}))).unwrap();
        assert_eq!(
            via,
            InitiationVia::OnChain {
                address: "bc1qxyz".to_string()
            }
        );
    }

    #[test]
    fn test_counterparty_selects_intraledger_verbatim() {
        let via = InitiationVia::try_from(raw(json!({"counterPartyUsername": "alice"}))).unwrap();
        assert_eq!(
            via,
            InitiationVia::IntraLedger {
                counter_party_username: Some("alice".to_string())
            }
        );

        let via = InitiationVia::try_from(raw(json!({"counterPartyUsername": null}))).unwrap();
        assert_eq!(
            via,
            InitiationVia::IntraLedger {
                counter_party_username: None
            }
        );
    }

    #[test]
    fn test_unknown_initiation_shape_is_rejected() {
        let err = InitiationVia::try_from(raw(json!({}))).unwrap_err();
        assert!(matches!(err, ClientError::Format(_)));
    }

    fn node(id: &str, created_at: i64, initiation_via: Value) -> Value {
        json!({"node": {
            "id": id,
            "status": "SUCCESS",
            "direction": "RECEIVE",
            "memo": null,
            "createdAt": created_at,
            "settlementAmount": 1500,
            "settlementCurrency": "BTC",
            "settlementDisplayAmount": "0.52",
            "initiationVia": initiation_via
        }})
    }

    #[tokio::test]
    async fn test_page_preserves_order_and_page_info() {
        let upstream = MockUpstream::json(json!({
            "data": {"me": {"defaultAccount": {"walletById": {"transactions": {
                "pageInfo": {
                    "hasNextPage": true,
                    "hasPreviousPage": false,
                    "startCursor": "cursor-start",
                    "endCursor": "cursor-end"
                },
                "edges": [
                    node("tx-2", 1_700_000_200, json!({"paymentHash": "ph"})),
                    {"node": {
                        "id": "tx-1",
                        "status": "PENDING",
                        "direction": "SEND",
                        "memo": "coffee",
                        "createdAt": 1_700_000_100,
                        "settlementAmount": -300,
                        "settlementCurrency": "USD",
                        "settlementDisplayAmount": "-3.00",
                        "initiationVia": {"address": "bc1qabc"}
                    }}
                ]
            }}}}}
        }))
        .await
        .unwrap();

        let page = processor_for(&upstream)
            .process(GetTransactions {
                wallet_id: "w1".to_string(),
                first: Some(2),
                after: None,
            })
            .await
            .unwrap();

        assert_eq!(
            page.page_info,
            PageInfo {
                has_next_page: true,
                has_previous_page: false,
                start_cursor: Some("cursor-start".to_string()),
                end_cursor: Some("cursor-end".to_string()),
            }
        );
        assert_eq!(page.transactions.len(), 2);

        let first = &page.transactions[0];
        assert_eq!(first.id, "tx-2");
        assert_eq!(first.status, TransactionStatus::Success);
        assert_eq!(first.direction, TransactionDirection::Receive);
        assert_eq!(first.memo, None);
        assert_eq!(first.created_at.unix_timestamp(), 1_700_000_200);
        assert_eq!(first.settlement_amount, 1500);
        assert_eq!(first.settlement_currency, WalletCurrency::Btc);
        assert_eq!(first.settlement_display_amount, "0.52");
        assert_eq!(
            first.initiation_via,
            InitiationVia::Lightning {
                payment_hash: "ph".to_string()
            }
        );

        let second = &page.transactions[1];
        assert_eq!(second.id, "tx-1");
        assert_eq!(second.status, TransactionStatus::Pending);
        assert_eq!(second.direction, TransactionDirection::Send);
        assert_eq!(second.memo.as_deref(), Some("coffee"));
        assert_eq!(second.settlement_amount, -300);
        assert_eq!(second.settlement_currency, WalletCurrency::Usd);
        assert_eq!(
            second.initiation_via,
            InitiationVia::OnChain {
                address: "bc1qabc".to_string()
            }
        );

        let body = &upstream.requests()[0].body;
        assert_eq!(body["variables"], json!({"walletId": "w1", "first": 2, "after": null}));
    }

    #[tokio::test]
    async fn test_default_page_size_and_cursor_on_the_wire() {
        let upstream = MockUpstream::json(json!({
            "data": {"me": {"defaultAccount": {"walletById": {"transactions": {
                "pageInfo": {
                    "hasNextPage": false,
                    "hasPreviousPage": true,
                    "startCursor": null,
                    "endCursor": null
                },
                "edges": []
            }}}}}
        }))
        .await
        .unwrap();

        let page = processor_for(&upstream)
            .process(GetTransactions {
                wallet_id: "w1".to_string(),
                first: None,
                after: Some("abc".to_string()),
            })
            .await
            .unwrap();
        assert!(page.transactions.is_empty());
        assert_eq!(page.page_info.end_cursor, None);

        let body = &upstream.requests()[0].body;
        assert_eq!(body["variables"]["first"], DEFAULT_PAGE_SIZE);
        assert_eq!(body["variables"]["after"], "abc");
    }

    #[tokio::test]
    async fn test_unrecognized_initiation_fails_the_page() {
        let upstream = MockUpstream::json(json!({
            "data": {"me": {"defaultAccount": {"walletById": {"transactions": {
                "pageInfo": {
                    "hasNextPage": false,
                    "hasPreviousPage": false,
                    "startCursor": null,
                    "endCursor": null
                },
                "edges": [node("tx-1", 1_700_000_000, json!({}))]
            }}}}}
        }))
        .await
        .unwrap();

        let err = processor_for(&upstream)
            .process(GetTransactions {
                wallet_id: "w1".to_string(),
                first: None,
                after: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.to_string(), FAILED);
    }
}
