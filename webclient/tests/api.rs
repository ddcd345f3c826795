use std::time::Duration;

use codeiv_webclient::api::urls;
use codeiv_webclient::*;

fn client(base: &str) -> ApiClient {
    ApiClient::new(Url::parse(base).unwrap(), Duration::from_secs(2)).unwrap()
}

/// Nothing listens on port 1, so every request fails at connect time.
fn unreachable_client() -> ApiClient {
    client("http://127.0.0.1:1")
}

#[test]
fn endpoint_catalog() {
    fn url(segments: &[&str]) -> String {
        let cli = client("http://localhost:5000");
        cli.http().endpoint(segments).unwrap().to_string()
    }

    assert_eq!(url(&urls::QUESTIONS), "http://localhost:5000/questions");
    assert_eq!(url(&urls::question("1")), "http://localhost:5000/questions/1");
    assert_eq!(url(&urls::SUBMIT), "http://localhost:5000/sessions/submit");
    assert_eq!(
        url(&urls::user_sessions("u-123")),
        "http://localhost:5000/sessions/user/u-123"
    );
    assert_eq!(url(&urls::SESSIONS), "http://localhost:5000/sessions");
    assert_eq!(url(&urls::USER_STATS), "http://localhost:5000/stats/users");
}

#[test]
fn default_base_url() {
    let cli = ApiClient::with_default_base_url().unwrap();
    assert_eq!(cli.base_url().as_str(), "http://localhost:5000/");
    assert!(!cli.is_authorized());
}

#[test]
fn auth_token_is_used_as_bearer() {
    let token = AuthToken {
        id_token: Some("id-token".to_owned()),
        uid: Some("u-1".to_owned()),
        ..Default::default()
    };
    let cli = client("http://localhost:5000").with_auth(&token);
    assert!(cli.is_authorized());

    let req = cli.http().post(&urls::SUBMIT).unwrap().build().unwrap();
    assert_eq!(
        req.headers().get("authorization").unwrap(),
        "Bearer id-token"
    );

    let cli = cli.with_auth(&AuthToken::default());
    assert!(!cli.is_authorized());
}

#[tokio::test]
async fn submit_to_unreachable_backend_fails_with_http_error() {
    let cli = unreachable_client();
    let res = cli
        .submit_code(&QuestionId::new("1"), "print(1)", "python")
        .await;
    assert!(matches!(res, Err(Error::Http(_))), "{:?}", res);
}

#[tokio::test]
async fn fetch_from_unreachable_backend_fails() {
    let cli = unreachable_client();
    assert!(cli.fetch_questions().await.is_err());
    assert!(cli.fetch_question(&QuestionId::new("1")).await.is_err());
    assert!(cli.fetch_user_sessions("u-1").await.is_err());
}
