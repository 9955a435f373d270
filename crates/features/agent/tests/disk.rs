mod fixtures;

use fixtures::{filled, signup_page};
use sfa_agent::{AgentBuilder, AgentError};
use sfa_domain::config::{AppConfig, CipherChoice, CompressionChoice};
use sfa_domain::{DomainKey, FieldType};

fn config(cipher: CipherChoice, compression: CompressionChoice) -> AppConfig {
    let mut config = AppConfig::default();
    config.vault.cipher = cipher;
    config.storage.compression = compression;
    config
}

#[tokio::test]
async fn learned_values_survive_restart_with_each_cipher() {
    for cipher in [CipherChoice::Aes256gcm, CipherChoice::Chacha20poly1305] {
        let dir = tempfile::tempdir().unwrap();
        let config = config(cipher, CompressionChoice::Lz4);

        let agent = AgentBuilder::new(config.clone()).data_dir(dir.path()).build().await.unwrap();
        let page = signup_page("shop.example");
        agent.scan(&page);
        agent.on_submit(&filled(page.clone(), &[("email", "a@x.com")])).await;
        drop(agent);

        let agent = AgentBuilder::new(config).data_dir(dir.path()).build().await.unwrap();
        let prefills = agent.scan(&page);
        assert_eq!(prefills.len(), 1, "{cipher:?}");
        assert_eq!(prefills[0].value, "a@x.com");
        assert!(dir.path().join("encKey.kv").exists());
        assert!(dir.path().join("learnedPatterns.kv").exists());
    }
}

#[tokio::test]
async fn corrupted_table_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(CipherChoice::Aes256gcm, CompressionChoice::None);

    let agent = AgentBuilder::new(config.clone()).data_dir(dir.path()).build().await.unwrap();
    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page.clone(), &[("email", "a@x.com")])).await;
    drop(agent);

    std::fs::write(dir.path().join("learnedPatterns.kv"), br#"{"data":[1,2,3],"iv":[0]}"#)
        .unwrap();

    let agent = AgentBuilder::new(config).data_dir(dir.path()).build().await.unwrap();
    assert!(agent.patterns().snapshot().is_empty());
    assert_eq!(agent.patterns().suggest(FieldType::Email, &DomainKey::wildcard()), None);
}

#[tokio::test]
async fn switching_cipher_rejects_the_stored_key() {
    let dir = tempfile::tempdir().unwrap();
    AgentBuilder::new(config(CipherChoice::Aes256gcm, CompressionChoice::None))
        .data_dir(dir.path())
        .build()
        .await
        .unwrap();

    let result = AgentBuilder::new(config(CipherChoice::Chacha20poly1305, CompressionChoice::None))
        .data_dir(dir.path())
        .build()
        .await;
    assert!(matches!(result, Err(AgentError::Vault { .. })));
}

#[tokio::test]
async fn switching_cipher_without_key_init_still_fails() {
    let dir = tempfile::tempdir().unwrap();
    let agent = AgentBuilder::new(config(CipherChoice::Aes256gcm, CompressionChoice::None))
        .data_dir(dir.path())
        .build()
        .await
        .unwrap();
    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page, &[("email", "a@x.com")])).await;
    drop(agent);

    let result = AgentBuilder::new(config(CipherChoice::Chacha20poly1305, CompressionChoice::None))
        .data_dir(dir.path())
        .init_key(false)
        .build()
        .await;
    assert!(matches!(result, Err(AgentError::Vault { .. })));

    let agent = AgentBuilder::new(config(CipherChoice::Aes256gcm, CompressionChoice::None))
        .data_dir(dir.path())
        .init_key(false)
        .build()
        .await
        .unwrap();
    assert_eq!(
        agent.patterns().suggest(FieldType::Email, &DomainKey::wildcard()).as_deref(),
        Some("a@x.com")
    );
}

#[tokio::test]
async fn lazy_key_is_created_on_first_learn() {
    let dir = tempfile::tempdir().unwrap();
    let agent = AgentBuilder::new(AppConfig::default())
        .data_dir(dir.path())
        .init_key(false)
        .build()
        .await
        .unwrap();
    assert!(!dir.path().join("encKey.kv").exists());

    let page = signup_page("shop.example");
    agent.scan(&page);
    agent.on_submit(&filled(page, &[("given", "Hana")])).await;
    assert!(dir.path().join("encKey.kv").exists());
}
