use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::invoice::money;
use crate::models::{
    ApprovalStatus, DashboardStats, Invoice, InvoiceStats, Project, ProjectStats, ProjectStatus,
    Task, TaskStats, TaskStatus, Worker, WorkerStatus,
};

use super::AppContext;

pub async fn dashboard(ctx: &AppContext) -> AppResult<DashboardStats> {
    let (workers, projects, tasks, invoices) = futures::try_join!(
        ctx.list::<Worker>(),
        ctx.list::<Project>(),
        ctx.list::<Task>(),
        ctx.list::<Invoice>(),
    )?;
    Ok(compute_dashboard(&workers, &projects, &tasks, &invoices, Utc::now()))
}

pub fn compute_dashboard(
    workers: &[Worker],
    projects: &[Project],
    tasks: &[Task],
    invoices: &[Invoice],
    now: DateTime<Utc>,
) -> DashboardStats {
    DashboardStats {
        total_workers: workers.len(),
        active_workers: workers
            .iter()
            .filter(|w| w.status == WorkerStatus::Active)
            .count(),
        projects: project_stats(projects),
        tasks: task_stats(tasks, now),
        invoices: invoice_stats(invoices),
    }
}

fn project_stats(projects: &[Project]) -> ProjectStats {
    projects
        .iter()
        .fold(ProjectStats::default(), |mut stats, project| {
            match project.status {
                ProjectStatus::Planned => stats.planned += 1,
                ProjectStatus::Active => stats.active += 1,
                ProjectStatus::OnHold => stats.on_hold += 1,
                ProjectStatus::Completed => stats.completed += 1,
            }
            stats
        })
}

/// Overdue only counts unfinished tasks.
fn task_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    tasks.iter().fold(TaskStats::default(), |mut stats, task| {
        if task.status == TaskStatus::Completed {
            stats.completed += 1;
        } else {
            stats.open += 1;
            if task.deadline.is_some_and(|deadline| deadline < now) {
                stats.overdue += 1;
            }
        }
        stats
    })
}

fn invoice_stats(invoices: &[Invoice]) -> InvoiceStats {
    let mut stats = InvoiceStats::default();
    for invoice in invoices {
        match invoice.approval_status {
            ApprovalStatus::Pending => stats.pending += 1,
            ApprovalStatus::Approved => stats.approved += 1,
            ApprovalStatus::Rejected => stats.rejected += 1,
            ApprovalStatus::Paid => stats.paid += 1,
        }
    }
    stats.unpaid_total = money::sum(
        invoices
            .iter()
            .filter(|i| i.approval_status == ApprovalStatus::Approved)
            .map(|i| &i.amount.final_amount),
    );
    stats
}
