mod fixtures;

use fixtures::{agent_over, filled, memory_agent, signup_page, slow_agent};
use sfa_agent::{FieldId, HostRequest, HostResponse, StatusResponse, SubmitReport};
use sfa_domain::{DomainKey, FieldType, SecurityLevel};
use sfa_storage::KeyValueStore;
use std::time::Duration;

#[tokio::test]
async fn submit_then_revisit_prefills() {
    let (_storage, agent) = memory_agent().await;
    let page = signup_page("shop.example");

    assert!(agent.scan(&page).is_empty());
    let report = agent
        .on_submit(&filled(page.clone(), &[("email", "a@x.com"), ("given", "Hana")]))
        .await;
    assert_eq!(report, SubmitReport { learned: 4, ignored: 0, failed: 0 });

    let prefills = agent.scan(&page);
    let by_field: Vec<_> =
        prefills.iter().map(|p| (p.field.as_str(), p.field_type, p.value.as_str())).collect();
    assert_eq!(
        by_field,
        [("email", FieldType::Email, "a@x.com"), ("given", FieldType::FirstName, "Hana")]
    );
}

#[tokio::test]
async fn other_sites_get_the_global_value() {
    let (_storage, agent) = memory_agent().await;
    agent.scan(&signup_page("a.example"));
    agent.on_submit(&filled(signup_page("a.example"), &[("email", "a@x.com")])).await;

    let prefills = agent.scan(&signup_page("b.example"));
    assert_eq!(prefills.len(), 1);
    assert_eq!(prefills[0].value, "a@x.com");

    let snapshot = agent.patterns().snapshot();
    let site = DomainKey::site("a.example").unwrap();
    assert!(snapshot.entry(FieldType::Email, &site).is_some());
    assert!(snapshot.entry(FieldType::Email, &DomainKey::site("b.example").unwrap()).is_none());
}

#[tokio::test]
async fn hidden_and_password_inputs_are_skipped() {
    let (_storage, agent) = memory_agent().await;
    let page = signup_page("shop.example");
    agent.scan(&page);

    let report = agent
        .on_submit(&filled(page, &[("trap", "Bot Corp"), ("pw", "hunter22")]))
        .await;
    assert_eq!(report, SubmitReport::default());
    assert!(agent.patterns().snapshot().is_empty());
}

#[tokio::test]
async fn focus_fills_once_and_only_empty_fields() {
    let (_storage, agent) = memory_agent().await;
    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page.clone(), &[("email", "a@x.com"), ("given", "Hana")])).await;

    agent.scan(&page);
    let email = FieldId::new("email");
    let given = FieldId::new("given");

    assert_eq!(agent.on_focus(&email, "").as_deref(), Some("a@x.com"));
    assert_eq!(agent.on_focus(&email, ""), None);
    assert_eq!(agent.on_focus(&given, "typed already"), None);
    assert_eq!(agent.on_focus(&given, ""), None);

    agent.scan(&page);
    assert_eq!(agent.on_focus(&given, "").as_deref(), Some("Hana"));
}

#[tokio::test]
async fn filled_fields_are_not_prefilled() {
    let (_storage, agent) = memory_agent().await;
    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page.clone(), &[("email", "a@x.com")])).await;

    let prefills = agent.scan(&filled(page, &[("email", "other@x.com")]));
    assert!(prefills.is_empty());
}

#[tokio::test]
async fn single_character_values_are_ignored() {
    let (_storage, agent) = memory_agent().await;
    let page = signup_page("shop.example");
    agent.scan(&page);

    let report = agent.on_submit(&filled(page, &[("given", "H")])).await;
    assert_eq!(report, SubmitReport { learned: 0, ignored: 2, failed: 0 });
}

#[tokio::test]
async fn pages_without_hostname_learn_globally() {
    let (_storage, agent) = memory_agent().await;
    let page = signup_page("");
    agent.scan(&page);

    let report = agent.on_submit(&filled(page, &[("email", "local@x.com")])).await;
    assert_eq!(report.learned, 1);
    let snapshot = agent.patterns().snapshot();
    assert_eq!(snapshot.stats().sites, 1);
    assert!(snapshot.entry(FieldType::Email, &DomainKey::wildcard()).is_some());
}

#[tokio::test]
async fn disabled_agent_neither_suggests_nor_learns() {
    let (storage, agent) = memory_agent().await;
    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page.clone(), &[("email", "a@x.com")])).await;

    agent.set_enabled(false).await.unwrap();
    assert!(agent.scan(&page).is_empty());
    let report = agent.on_submit(&filled(page, &[("email", "b@x.com")])).await;
    assert_eq!(report, SubmitReport::default());

    let restarted = agent_over(&storage).await;
    assert!(!restarted.is_enabled());
}

#[tokio::test]
async fn host_messages() {
    let (_storage, agent) = memory_agent().await;
    agent.on_installed(1_700_000_000_000).await.unwrap();

    let status = agent.handle(HostRequest::GetStatus).await.unwrap();
    assert_eq!(
        status,
        HostResponse::Status(StatusResponse { enabled: true, security_level: SecurityLevel::High })
    );

    let HostResponse::Stats { patterns } = agent.handle(HostRequest::GetStats).await.unwrap()
    else {
        panic!("expected stats");
    };
    assert!(patterns.is_empty());
}

#[tokio::test]
async fn clear_all_wipes_storage_and_key() {
    let (storage, agent) = memory_agent().await;
    agent.on_installed(1_700_000_000_000).await.unwrap();
    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page.clone(), &[("email", "a@x.com")])).await;
    let old_key = storage.get("encKey").await.unwrap();

    let response = agent.handle(HostRequest::ClearAll).await.unwrap();
    assert_eq!(response, HostResponse::Cleared { cleared: true });
    assert_eq!(storage.len(), 0);
    assert!(agent.patterns().snapshot().is_empty());
    assert!(agent.scan(&page).is_empty());

    agent.scan(&page);
    agent.on_submit(&filled(page, &[("email", "new@x.com")])).await;
    assert!(storage.contains("encKey"));
    assert_ne!(storage.get("encKey").await.unwrap(), old_key);
}

#[tokio::test(start_paused = true)]
async fn clear_all_waits_for_the_write_in_flight() {
    let (storage, agent) = slow_agent(Duration::from_millis(150)).await;
    let site = DomainKey::site("shop.example").unwrap();

    let (learned, cleared) = tokio::join!(
        agent.patterns().learn(FieldType::Email, "a@x.com", &site),
        async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            agent.clear_all().await
        },
    );

    learned.unwrap();
    cleared.unwrap();
    assert!(!storage.inner.contains("learnedPatterns"));
    assert!(!storage.inner.contains("encKey"));
    assert_eq!(storage.inner.len(), 0);
    assert!(agent.patterns().snapshot().is_empty());
}
