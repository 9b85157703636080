use sqlx::PgPool;
use storage::{
    dto::{
        admin::{AdminMemberList, MemberFilter},
        member::MemberResponse,
    },
    error::Result,
    models::Member,
    repository::member::MemberRepository,
};
use uuid::Uuid;

pub async fn list_members(pool: &PgPool, filter: MemberFilter) -> Result<AdminMemberList> {
    let repo = MemberRepository::new(pool);

    let members = repo.list(filter.approval()).await?;
    let pending_count = repo.count_pending().await?;

    Ok(AdminMemberList {
        members: members.into_iter().map(MemberResponse::from).collect(),
        pending_count,
    })
}

pub async fn set_approval(pool: &PgPool, id: Uuid, approved: bool) -> Result<Member> {
    let member = MemberRepository::new(pool).set_approval(id, approved).await?;
    tracing::info!(
        "Member {} ({}) {}",
        member.id,
        member.slug,
        if approved { "approved" } else { "revoked" }
    );
    Ok(member)
}

pub async fn delete_member(pool: &PgPool, id: Uuid) -> Result<()> {
    MemberRepository::new(pool).delete(id).await?;
    tracing::info!("Member {} deleted", id);
    Ok(())
}
