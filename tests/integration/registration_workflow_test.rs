//! Registration workflow integration tests
//!
//! These exercise the submission transaction, the database-enforced
//! duplicate-member guard, and the registration lifecycle against a
//! real PostgreSQL. Run them with:
//!
//! ```bash
//! TEST_DATABASE_URL=postgresql://... cargo test -p clubhub-integration-tests -- --ignored
//! ```

mod common;

use axum::extract::{Path, State};
use tokio::time::{sleep, Duration};

use clubhub_auth::AuthUser;
use clubhub_common::Error;
use clubhub_registrations::api::handlers::teams;
use clubhub_registrations::repository::transactions::submit_registration_tx;
use clubhub_registrations::{PaymentStatus, RegistrationStatus};

use common::{build_submission, unique_email, ChainCounts, TestApp};

/// A conflict on the second member insert must leave no trace of the
/// submission: no team, no members, no form response, no registration.
#[tokio::test]
#[ignore]
async fn conflicting_member_insert_rolls_back_whole_submission() {
    let app = TestApp::new().await.expect("test app");
    let chain = app.seed_event_chain().await.expect("event chain");

    // The same email twice in one payload slips past the read-side
    // duplicate check (it only sees stored rows) and trips the unique
    // index on the second insert.
    let email = unique_email("dup");
    let fixture = build_submission(&chain, "Rollback Team", &[&email, &email]).expect("fixture");

    let repos = app.registrations();
    let mut tx = repos.begin().await.expect("begin");
    let result = submit_registration_tx(
        &mut tx,
        &fixture.team,
        &fixture.members,
        &fixture.form_response,
        &fixture.registration,
    )
    .await;

    assert!(
        matches!(result, Err(Error::Conflict(_))),
        "unique violation should surface as Conflict, got {result:?}"
    );
    drop(tx);

    let counts = app
        .chain_counts(chain.event.id, chain.form.id)
        .await
        .expect("counts");
    assert_eq!(
        counts,
        ChainCounts {
            teams: 0,
            members: 0,
            form_responses: 0,
            registrations: 0,
        },
        "rolled-back submission must leave no rows behind"
    );
}

/// Two submissions racing on the same member email: the unique index
/// lets exactly one commit, the other gets a conflict after the winner
/// commits.
#[tokio::test]
#[ignore]
async fn concurrent_duplicate_member_admits_exactly_one_team() {
    let app = TestApp::new().await.expect("test app");
    let chain = app.seed_event_chain().await.expect("event chain");

    let email = unique_email("race");
    let first = build_submission(&chain, "First Team", &[&email]).expect("fixture");
    let second = build_submission(&chain, "Second Team", &[&email]).expect("fixture");

    let repos = app.registrations();
    let mut tx1 = repos.begin().await.expect("begin first");
    submit_registration_tx(
        &mut tx1,
        &first.team,
        &first.members,
        &first.form_response,
        &first.registration,
    )
    .await
    .expect("first submission");

    // The second transaction blocks on the uncommitted unique index
    // entry, so it must run on its own task while we commit the first.
    let racer = {
        let repos = repos.clone();
        tokio::spawn(async move {
            let mut tx2 = repos.begin().await?;
            submit_registration_tx(
                &mut tx2,
                &second.team,
                &second.members,
                &second.form_response,
                &second.registration,
            )
            .await?;
            tx2.commit().await.map_err(Error::Database)?;
            Ok::<(), Error>(())
        })
    };

    sleep(Duration::from_millis(200)).await;
    tx1.commit().await.expect("commit first");

    let loser = racer.await.expect("racer task");
    assert!(
        matches!(loser, Err(Error::Conflict(_))),
        "losing submission should get Conflict, got {loser:?}"
    );

    let stored: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE member_email = $1")
            .bind(&email)
            .fetch_one(&app.pool)
            .await
            .expect("count");
    assert_eq!(stored, 1, "exactly one of the racing teams may register");
}

/// A member under some other event must stay out of reach even when
/// the caller owns a perfectly valid chain of their own.
#[tokio::test]
#[ignore]
async fn member_delete_rejects_team_from_another_event() {
    let app = TestApp::new().await.expect("test app");
    let mine = app.seed_event_chain().await.expect("first chain");
    let other = app.seed_event_chain().await.expect("second chain");

    let fixture =
        build_submission(&other, "Other Team", &[&unique_email("other")]).expect("fixture");
    let repos = app.registrations();
    let mut tx = repos.begin().await.expect("begin");
    submit_registration_tx(
        &mut tx,
        &fixture.team,
        &fixture.members,
        &fixture.form_response,
        &fixture.registration,
    )
    .await
    .expect("submission");
    tx.commit().await.expect("commit");

    let foreign_team = fixture.team.id;
    let foreign_member = fixture.members[0].id;

    let result = teams::delete_member(
        AuthUser(mine.owner_context()),
        State(app.registrations_state()),
        Path((mine.club.id, mine.event.id, foreign_team, foreign_member)),
    )
    .await;

    assert!(
        matches!(result, Err(Error::NotFound(_))),
        "member outside the event chain must be NotFound, got {:?}",
        result.err()
    );

    let still_there = repos
        .teams
        .find_member(foreign_team, foreign_member)
        .await
        .expect("lookup");
    assert!(still_there.is_some(), "foreign member must survive");
}

/// Submit, confirm, mark paid, and read the statistics back.
#[tokio::test]
#[ignore]
async fn registration_lifecycle_end_to_end() {
    let app = TestApp::new().await.expect("test app");
    let chain = app.seed_event_chain().await.expect("event chain");

    let fixture = build_submission(
        &chain,
        "Lifecycle Team",
        &[&unique_email("lead"), &unique_email("mate")],
    )
    .expect("fixture");

    let repos = app.registrations();
    let mut tx = repos.begin().await.expect("begin");
    submit_registration_tx(
        &mut tx,
        &fixture.team,
        &fixture.members,
        &fixture.form_response,
        &fixture.registration,
    )
    .await
    .expect("submission");
    tx.commit().await.expect("commit");

    let mut registration = repos
        .registrations
        .find_in_event(chain.event.id, fixture.registration.id)
        .await
        .expect("lookup")
        .expect("stored registration");
    assert_eq!(registration.status, RegistrationStatus::Pending);
    assert_eq!(registration.payment_status, PaymentStatus::Unpaid);
    assert!(registration.ticket_code.is_none());

    registration.confirm().expect("confirm");
    registration.set_payment(PaymentStatus::Paid);
    let updated = repos
        .registrations
        .update(&registration)
        .await
        .expect("update");

    assert_eq!(updated.status, RegistrationStatus::Confirmed);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    let ticket = updated.ticket_code.expect("ticket minted on payment");
    assert!(ticket.starts_with(&format!("TICKET-{}-", updated.id)));

    let detail = repos
        .registrations
        .find_detail(chain.event.id, updated.id)
        .await
        .expect("detail")
        .expect("stored detail");
    assert_eq!(detail.team.members.len(), 2);
    assert_eq!(detail.form_response.id, fixture.form_response.id);

    let stats = repos
        .registrations
        .stats(chain.event.id)
        .await
        .expect("stats");
    assert_eq!(stats.total_registrations, 1);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.paid, 1);
    assert_eq!(stats.unpaid, 0);
}
