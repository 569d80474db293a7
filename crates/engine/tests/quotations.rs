use engine::{
    ClientDraft, CompanyProfile, CreateQuotationCmd, Engine, EngineError, LineItemDraft,
    MoneyCents, UpdateClientCmd, UpdateLineItemCmd,
};
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

/// The worked example: 2 × 1000.00 + 1 × 2500.00 with a full client block.
fn full_intake() -> CreateQuotationCmd {
    CreateQuotationCmd::new(
        ClientDraft::new("Ada Rossi")
            .company_name("Rossi SRL")
            .email("ada@rossi.example")
            .phone("+39 333 1122333")
            .address("Via Roma 1, Torino"),
    )
    .subject("Website revamp")
    .item(LineItemDraft::new("Design", 2, "1000.00"))
    .item(LineItemDraft::new("Development", 1, "2500.00"))
}

async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table};"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn create_quotation_computes_totals_and_first_number() {
    let (engine, _db) = engine_with_db().await;

    let (quotation, client) = engine.create_quotation(full_intake()).await.unwrap();

    assert_eq!(quotation.number, 1);
    assert_eq!(quotation.subtotal, MoneyCents::new(450_000));
    assert_eq!(quotation.tax, MoneyCents::new(85_500));
    assert_eq!(quotation.total, MoneyCents::new(535_500));
    assert!(quotation.active);

    let positions: Vec<i32> = quotation.items.iter().map(|item| item.position).collect();
    assert_eq!(positions, vec![1, 2]);
    assert_eq!(quotation.items[0].total, MoneyCents::new(200_000));
    assert_eq!(quotation.items[1].total, MoneyCents::new(250_000));

    let client = client.unwrap();
    assert_eq!(client.contact_name, "Ada Rossi");
    assert_eq!(client.email.as_deref(), Some("ada@rossi.example"));
    assert_eq!(quotation.client_id, Some(client.id));
}

#[tokio::test]
async fn empty_quotation_gets_zero_totals_and_next_number() {
    let (engine, _db) = engine_with_db().await;
    engine.create_quotation(full_intake()).await.unwrap();

    let cmd = CreateQuotationCmd::new(ClientDraft::new("Bruno Bianchi"));
    let (quotation, _client) = engine.create_quotation(cmd).await.unwrap();

    assert_eq!(quotation.number, 2);
    assert!(quotation.items.is_empty());
    assert_eq!(quotation.subtotal, MoneyCents::ZERO);
    assert_eq!(quotation.tax, MoneyCents::ZERO);
    assert_eq!(quotation.total, MoneyCents::ZERO);
}

#[tokio::test]
async fn same_email_reuses_and_overwrites_client() {
    let (engine, _db) = engine_with_db().await;

    let (_, first) = engine.create_quotation(full_intake()).await.unwrap();
    let first = first.unwrap();

    let cmd = CreateQuotationCmd::new(
        ClientDraft::new("Ada Maria Rossi")
            .company_name("Rossi & Figli SRL")
            .email("ada@rossi.example")
            .phone("+39 333 0000000"),
    );
    let (_, second) = engine.create_quotation(cmd).await.unwrap();
    let second = second.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.contact_name, "Ada Maria Rossi");
    assert_eq!(second.company_name.as_deref(), Some("Rossi & Figli SRL"));
    assert_eq!(second.phone.as_deref(), Some("+39 333 0000000"));
    // Last write wins on every contact field, including clearing one.
    assert_eq!(second.address, None);

    // Surrounding whitespace does not make it a different email.
    let cmd = CreateQuotationCmd::new(
        ClientDraft::new("Ada Rossi").email("  ada@rossi.example  "),
    );
    let (_, third) = engine.create_quotation(cmd).await.unwrap();
    assert_eq!(third.unwrap().id, first.id);

    let clients = engine.clients().await.unwrap();
    assert_eq!(clients.len(), 1);
}

#[tokio::test]
async fn missing_email_always_creates_a_new_client() {
    let (engine, _db) = engine_with_db().await;

    let cmd = || CreateQuotationCmd::new(ClientDraft::new("Walk-in"));
    let (_, c1) = engine.create_quotation(cmd()).await.unwrap();
    let (_, c2) = engine.create_quotation(cmd()).await.unwrap();

    assert_ne!(c1.unwrap().id, c2.unwrap().id);
    assert_eq!(engine.clients().await.unwrap().len(), 2);
}

#[tokio::test]
async fn blank_email_counts_as_absent() {
    let (engine, _db) = engine_with_db().await;

    let cmd = || CreateQuotationCmd::new(ClientDraft::new("Walk-in").email("   "));
    let (_, c1) = engine.create_quotation(cmd()).await.unwrap();
    let (_, c2) = engine.create_quotation(cmd()).await.unwrap();

    let c1 = c1.unwrap();
    assert_eq!(c1.email, None);
    assert_ne!(c1.id, c2.unwrap().id);
}

#[tokio::test]
async fn numbers_are_monotonic_and_never_reused() {
    let (engine, _db) = engine_with_db().await;

    let mut created = Vec::new();
    for _ in 0..3 {
        let (quotation, _) = engine
            .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
            .await
            .unwrap();
        created.push((quotation.id, quotation.number));
    }
    let numbers: Vec<i64> = created.iter().map(|(_, number)| *number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    // Deactivating the highest number must not free it up.
    engine.deactivate_quotation(created[2].0).await.unwrap();
    assert_eq!(engine.peek_next_number().await.unwrap(), 4);

    let (quotation, _) = engine
        .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
        .await
        .unwrap();
    assert_eq!(quotation.number, 4);
}

#[tokio::test]
async fn peek_next_number_allocates_nothing() {
    let (engine, db) = engine_with_db().await;

    assert_eq!(engine.peek_next_number().await.unwrap(), 1);
    assert_eq!(engine.peek_next_number().await.unwrap(), 1);
    assert_eq!(count_rows(&db, "quotations").await, 0);
}

#[tokio::test]
async fn failed_creation_leaves_no_trace() {
    let (engine, db) = engine_with_db().await;
    let (_, client) = engine.create_quotation(full_intake()).await.unwrap();
    let client = client.unwrap();

    // Same email, new contact data, one bad item at position 3.
    let cmd = CreateQuotationCmd::new(ClientDraft::new("Somebody Else").email("ada@rossi.example"))
        .item(LineItemDraft::new("Design", 1, "100.00"))
        .item(LineItemDraft::new("Development", 1, "100.00"))
        .item(LineItemDraft::new("Hosting", 0, "100.00"));

    let err = engine.create_quotation(cmd).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("item 3: quantity must be > 0".to_string())
    );

    // No quotation, no items, no burned number, no client overwrite.
    assert_eq!(count_rows(&db, "quotations").await, 1);
    assert_eq!(count_rows(&db, "line_items").await, 2);
    assert_eq!(engine.peek_next_number().await.unwrap(), 2);
    let unchanged = engine.client(client.id).await.unwrap();
    assert_eq!(unchanged.contact_name, "Ada Rossi");
}

#[tokio::test]
async fn intake_validation_names_the_offending_field() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_quotation(CreateQuotationCmd::new(ClientDraft::new("  ")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("client contact name must not be empty".to_string())
    );

    let err = engine
        .create_quotation(
            CreateQuotationCmd::new(ClientDraft::new("Ada"))
                .item(LineItemDraft::new("Design", 1, "12.345")),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("item 1: invalid unit price \"12.345\"".to_string())
    );

    let err = engine
        .create_quotation(
            CreateQuotationCmd::new(ClientDraft::new("Ada"))
                .item(LineItemDraft::new("Design", 1, "-5.00")),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("item 1: unit price must not be negative".to_string())
    );

    let err = engine
        .create_quotation(
            CreateQuotationCmd::new(ClientDraft::new("Ada"))
                .item(LineItemDraft::new("   ", 1, "10.00")),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("item 1 description must not be empty".to_string())
    );
}

#[tokio::test]
async fn item_edits_recompute_totals() {
    let (engine, _db) = engine_with_db().await;

    let cmd = CreateQuotationCmd::new(ClientDraft::new("Ada Rossi"))
        .item(LineItemDraft::new("Development", 3, "1500.00"));
    let (quotation, _) = engine.create_quotation(cmd).await.unwrap();
    assert_eq!(quotation.total, MoneyCents::new(535_500));

    let (quotation, _) = engine
        .add_line_item(quotation.id, LineItemDraft::new("Hosting", 1, "500.00"))
        .await
        .unwrap();
    assert_eq!(quotation.subtotal, MoneyCents::new(500_000));
    assert_eq!(quotation.tax, MoneyCents::new(95_000));
    assert_eq!(quotation.total, MoneyCents::new(595_000));
    let hosting = quotation
        .items
        .iter()
        .find(|item| item.description == "Hosting")
        .unwrap()
        .clone();
    assert_eq!(hosting.position, 2);

    let (quotation, _) = engine
        .update_line_item(UpdateLineItemCmd::new(quotation.id, hosting.id).quantity(2))
        .await
        .unwrap();
    assert_eq!(quotation.subtotal, MoneyCents::new(550_000));
    assert_eq!(quotation.tax, MoneyCents::new(104_500));
    assert_eq!(quotation.total, MoneyCents::new(654_500));

    let development = quotation
        .items
        .iter()
        .find(|item| item.description == "Development")
        .unwrap()
        .id;
    let (quotation, _) = engine
        .remove_line_item(quotation.id, development)
        .await
        .unwrap();
    assert_eq!(quotation.subtotal, MoneyCents::new(100_000));
    assert_eq!(quotation.tax, MoneyCents::new(19_000));
    assert_eq!(quotation.total, MoneyCents::new(119_000));

    // Positions keep their gaps; a new item continues after the highest one.
    let (quotation, _) = engine
        .add_line_item(quotation.id, LineItemDraft::new("Support", 1, "100.00"))
        .await
        .unwrap();
    let positions: Vec<i32> = quotation.items.iter().map(|item| item.position).collect();
    assert_eq!(positions, vec![2, 3]);
}

#[tokio::test]
async fn update_line_item_rejects_invalid_merge() {
    let (engine, _db) = engine_with_db().await;
    let cmd = CreateQuotationCmd::new(ClientDraft::new("Ada Rossi"))
        .item(LineItemDraft::new("Development", 3, "1500.00"));
    let (quotation, _) = engine.create_quotation(cmd).await.unwrap();
    let item_id = quotation.items[0].id;

    let err = engine
        .update_line_item(UpdateLineItemCmd::new(quotation.id, item_id).quantity(0))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("quantity must be > 0".to_string())
    );

    let (quotation, _) = engine.quotation(quotation.id).await.unwrap();
    assert_eq!(quotation.total, MoneyCents::new(535_500));
    assert_eq!(quotation.items[0].quantity, 3);
}

#[tokio::test]
async fn deactivated_quotation_stays_readable() {
    let (engine, _db) = engine_with_db().await;
    let (quotation, _) = engine.create_quotation(full_intake()).await.unwrap();

    engine.deactivate_quotation(quotation.id).await.unwrap();

    let (read, _) = engine.quotation(quotation.id).await.unwrap();
    assert!(!read.active);
    assert_eq!(read.number, quotation.number);
    assert_eq!(read.total, quotation.total);
    assert_eq!(read.items.len(), 2);

    let active_only = engine.quotations(false, 10).await.unwrap();
    assert!(active_only.is_empty());
    let all = engine.quotations(true, 10).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn list_pages_follow_the_cursor() {
    let (engine, _db) = engine_with_db().await;
    for _ in 0..5 {
        engine
            .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
            .await
            .unwrap();
    }

    let (page, cursor) = engine.quotations_page(false, 2, None).await.unwrap();
    let numbers: Vec<i64> = page.iter().map(|(quotation, _)| quotation.number).collect();
    assert_eq!(numbers, vec![5, 4]);
    let cursor = cursor.unwrap();

    let (page, cursor) = engine
        .quotations_page(false, 2, Some(&cursor))
        .await
        .unwrap();
    let numbers: Vec<i64> = page.iter().map(|(quotation, _)| quotation.number).collect();
    assert_eq!(numbers, vec![3, 2]);
    let cursor = cursor.unwrap();

    let (page, cursor) = engine
        .quotations_page(false, 2, Some(&cursor))
        .await
        .unwrap();
    let numbers: Vec<i64> = page.iter().map(|(quotation, _)| quotation.number).collect();
    assert_eq!(numbers, vec![1]);
    assert!(cursor.is_none());

    let err = engine
        .quotations_page(false, 2, Some("not-a-cursor"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("invalid quotations cursor".to_string())
    );
}

#[tokio::test]
async fn statistics_count_active_quotations_only() {
    let (engine, _db) = engine_with_db().await;

    let (first, _) = engine.create_quotation(full_intake()).await.unwrap();
    engine
        .create_quotation(
            CreateQuotationCmd::new(ClientDraft::new("Walk-in"))
                .item(LineItemDraft::new("Development", 1, "1000.00")),
        )
        .await
        .unwrap();
    engine
        .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
        .await
        .unwrap();

    engine.deactivate_quotation(first.id).await.unwrap();

    let stats = engine.statistics().await.unwrap();
    assert_eq!(stats.active_quotations, 2);
    assert_eq!(stats.quoted_total, MoneyCents::new(119_000));
    assert_eq!(stats.clients, 3);
}

#[tokio::test]
async fn client_delete_is_blocked_while_referenced() {
    let (engine, db) = engine_with_db().await;
    let (quotation, client) = engine.create_quotation(full_intake()).await.unwrap();
    let client_id = client.unwrap().id;

    let err = engine.delete_client(client_id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Integrity("client still referenced by quotations".to_string())
    );

    // An inactive quotation still counts as a reference.
    engine.deactivate_quotation(quotation.id).await.unwrap();
    let err = engine.delete_client(client_id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Integrity("client still referenced by quotations".to_string())
    );

    // The admin purge removes quotations and items but keeps clients; only
    // then the client can go.
    let purged = engine.purge_quotations().await.unwrap();
    assert_eq!(purged, 1);
    assert_eq!(count_rows(&db, "line_items").await, 0);
    engine.delete_client(client_id).await.unwrap();
    assert!(engine.clients().await.unwrap().is_empty());
}

#[tokio::test]
async fn purge_resets_numbering() {
    let (engine, _db) = engine_with_db().await;
    for _ in 0..2 {
        engine
            .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
            .await
            .unwrap();
    }

    engine.purge_quotations().await.unwrap();

    let (quotation, _) = engine
        .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
        .await
        .unwrap();
    assert_eq!(quotation.number, 1);
}

#[tokio::test]
async fn update_client_merges_fields_and_guards_email() {
    let (engine, _db) = engine_with_db().await;
    engine.create_quotation(full_intake()).await.unwrap();
    let (_, bruno) = engine
        .create_quotation(CreateQuotationCmd::new(
            ClientDraft::new("Bruno Bianchi").email("bruno@bianchi.example"),
        ))
        .await
        .unwrap();
    let bruno = bruno.unwrap();

    let err = engine
        .update_client(UpdateClientCmd::new(bruno.id).email("ada@rossi.example"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Conflict("client email already registered".to_string())
    );

    let updated = engine
        .update_client(UpdateClientCmd::new(bruno.id).contact_name("Bruno B. Bianchi"))
        .await
        .unwrap();
    assert_eq!(updated.contact_name, "Bruno B. Bianchi");
    assert_eq!(updated.email.as_deref(), Some("bruno@bianchi.example"));
}

#[tokio::test]
async fn clients_list_orders_by_company_name() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_quotation(CreateQuotationCmd::new(
            ClientDraft::new("Zoe")
                .company_name("Zenith")
                .email("zoe@zenith.example"),
        ))
        .await
        .unwrap();
    engine
        .create_quotation(CreateQuotationCmd::new(
            ClientDraft::new("Al")
                .company_name("Acme")
                .email("al@acme.example"),
        ))
        .await
        .unwrap();

    let clients = engine.clients().await.unwrap();
    let companies: Vec<Option<&str>> = clients
        .iter()
        .map(|client| client.company_name.as_deref())
        .collect();
    assert_eq!(companies, vec![Some("Acme"), Some("Zenith")]);
}

#[tokio::test]
async fn document_embeds_company_profile_once_stored() {
    let (engine, _db) = engine_with_db().await;
    let (quotation, _) = engine.create_quotation(full_intake()).await.unwrap();

    let document = engine.quotation_document(quotation.id).await.unwrap();
    assert!(document.company.is_none());
    assert_eq!(document.quotation.id, quotation.id);

    engine
        .set_company_profile(CompanyProfile {
            name: "Studio Verdi".to_string(),
            tax_id: "IT01234567890".to_string(),
            address: "Corso Francia 10, Torino".to_string(),
            phone: "+39 011 000000".to_string(),
            email: "studio@verdi.example".to_string(),
        })
        .await
        .unwrap();

    let document = engine.quotation_document(quotation.id).await.unwrap();
    assert_eq!(document.company.unwrap().name, "Studio Verdi");
    assert_eq!(document.client.unwrap().contact_name, "Ada Rossi");

    // A second set overwrites the single profile row.
    engine
        .set_company_profile(CompanyProfile {
            name: "Studio Verdi SRL".to_string(),
            tax_id: "IT01234567890".to_string(),
            address: "Corso Francia 10, Torino".to_string(),
            phone: "+39 011 000000".to_string(),
            email: "studio@verdi.example".to_string(),
        })
        .await
        .unwrap();
    let profile = engine.company_profile().await.unwrap().unwrap();
    assert_eq!(profile.name, "Studio Verdi SRL");
}

#[tokio::test]
async fn unknown_ids_surface_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.quotation(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("quotation not exists".to_string())
    );

    let err = engine.client(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("client not exists".to_string())
    );

    let (quotation, _) = engine
        .create_quotation(CreateQuotationCmd::new(ClientDraft::new("Walk-in")))
        .await
        .unwrap();
    let err = engine
        .remove_line_item(quotation.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("line item not exists".to_string())
    );
}

#[tokio::test]
async fn restart_engine_reads_same_state() {
    let (engine, db, url, path) = engine_with_file_db().await;

    let (quotation, _) = engine.create_quotation(full_intake()).await.unwrap();

    drop(engine);
    drop(db);

    let db2 = Database::connect(&url).await.unwrap();
    let engine2 = Engine::builder().database(db2.clone()).build().await.unwrap();

    let (read, client) = engine2.quotation(quotation.id).await.unwrap();
    assert_eq!(read.number, 1);
    assert_eq!(read.total, MoneyCents::new(535_500));
    assert_eq!(read.items.len(), 2);
    assert_eq!(client.unwrap().contact_name, "Ada Rossi");
    assert_eq!(engine2.peek_next_number().await.unwrap(), 2);

    drop(db2);
    let _ = std::fs::remove_file(path);
}
