//! Client → relay → upstream, with a real relay and SQLite ledger.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use fx_client::{ClientError, RelayClient, fetch_and_log};
use fx_common::DeadlineBudget;
use fx_server::ledger::SqliteLedger;
use fx_server::source::HttpQuoteSource;
use fx_server::{AcquisitionPipeline, RelayState};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE: &str = r#"{"USDBRL":{"Code":"USD","Codein":"BRL","Name":"Dólar/Real","High":"5.10","Low":"5.00","VarBid":"0.01","PctChange":"0.2","Bid":"5.05","Ask":"5.06","Timestamp":"1700000000","create_date":"2023-11-14 12:00:00"}}"#;

struct Stack {
    _upstream: MockServer,
    relay: SocketAddr,
    ledger: Arc<SqliteLedger>,
    budget: DeadlineBudget,
    stop: oneshot::Sender<()>,
    dir: tempfile::TempDir,
}

async fn start_stack(upstream_response: ResponseTemplate) -> Stack {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/last/USD-BRL"))
        .respond_with(upstream_response)
        .mount(&upstream)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", dir.path().join("exchange.db").display());
    let ledger = Arc::new(SqliteLedger::connect(&db_url, 4).await.unwrap());
    let source = HttpQuoteSource::new(format!("{}/json/last/USD-BRL", upstream.uri())).unwrap();
    let budget = DeadlineBudget::from_millis(800, 300, 200).unwrap();
    let pipeline = AcquisitionPipeline::new(Arc::new(source), ledger.clone(), budget);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let relay = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(fx_server::serve(listener, RelayState::new(pipeline), async move {
        let _ = stopped.await;
    }));

    Stack {
        _upstream: upstream,
        relay,
        ledger,
        budget,
        stop,
        dir,
    }
}

fn client_timeout(stack: &Stack) -> Duration {
    let timeout = stack.budget.request() + Duration::from_millis(400);
    fx_common::deadline::ensure_client_headroom(
        timeout,
        stack.budget.request(),
        Duration::from_millis(100),
    )
    .unwrap();
    timeout
}

#[tokio::test]
async fn bid_travels_from_upstream_to_file() {
    let stack = start_stack(ResponseTemplate::new(200).set_body_string(SAMPLE)).await;
    let client = RelayClient::new(format!("http://{}/cotacao", stack.relay)).unwrap();
    let output = stack.dir.path().join("cotacao.txt");

    let bid = fetch_and_log(&client, &output, client_timeout(&stack)).await.unwrap();
    assert_eq!(bid, 5.05);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Dolar: 5.050000\n");

    // A second run re-fetches the same quote: one more line, still one row.
    fetch_and_log(&client, &output, client_timeout(&stack)).await.unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Dolar: 5.050000\nDolar: 5.050000\n"
    );
    assert_eq!(stack.ledger.count().await.unwrap(), 1);

    let _ = stack.stop.send(());
}

#[tokio::test]
async fn upstream_timeout_reaches_client_as_server_error() {
    let slow = ResponseTemplate::new(200)
        .set_body_string(SAMPLE)
        .set_delay(Duration::from_millis(700));
    let stack = start_stack(slow).await;
    let client = RelayClient::new(format!("http://{}/cotacao", stack.relay)).unwrap();
    let output = stack.dir.path().join("cotacao.txt");

    let result = fetch_and_log(&client, &output, client_timeout(&stack)).await;

    assert!(matches!(result, Err(ClientError::BadStatus(500))), "got {result:?}");
    assert!(!output.exists());
    assert_eq!(stack.ledger.count().await.unwrap(), 0);

    let _ = stack.stop.send(());
}
