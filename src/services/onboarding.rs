use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::database::{
    DataAccessError, DataStore, Guarded, OrderBy,
    models::{OnboardingInput, OnboardingRecord, OnboardingTask, TaskCategory, TaskStatus},
};
use crate::error::AppError;
use crate::reporting::RecordFilter;

/// A task every new hire gets, due `due_in_days` after the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub category: TaskCategory,
    pub due_in_days: i64,
}

const fn task(title: &'static str, category: TaskCategory, due_in_days: i64) -> TaskTemplate {
    TaskTemplate {
        title,
        category,
        due_in_days,
    }
}

const COMMON_TASKS: &[TaskTemplate] = &[
    task("Assinar contrato de trabalho", TaskCategory::Documentation, 0),
    task("Entregar documentos pessoais (BI, NIF)", TaskCategory::Documentation, 2),
    task("Inscrição na Segurança Social (INSS)", TaskCategory::Documentation, 7),
    task("Preparar posto de trabalho", TaskCategory::Equipment, 0),
    task("Criar conta de e-mail", TaskCategory::Access, 1),
    task("Sessão de acolhimento", TaskCategory::Training, 1),
];

const TECNOLOGIA_TASKS: &[TaskTemplate] = &[
    task("Entregar portátil", TaskCategory::Equipment, 0),
    task("Acesso ao repositório de código", TaskCategory::Access, 2),
    task("Formação em segurança informática", TaskCategory::Training, 10),
];

const VENDAS_TASKS: &[TaskTemplate] = &[
    task("Acesso ao CRM", TaskCategory::Access, 2),
    task("Formação de produto", TaskCategory::Training, 5),
];

const FINANCAS_TASKS: &[TaskTemplate] = &[
    task("Acesso ao sistema contabilístico", TaskCategory::Access, 3),
    task("Formação em procedimentos fiscais (AGT)", TaskCategory::Training, 10),
];

const RECURSOS_HUMANOS_TASKS: &[TaskTemplate] = &[
    task("Acesso ao processamento salarial", TaskCategory::Access, 3),
    task("Formação na Lei Geral do Trabalho", TaskCategory::Training, 14),
];

/// Lower-case, accent-free form used to look departments up.
fn department_key(department: &str) -> String {
    department
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

fn department_tasks(department: &str) -> &'static [TaskTemplate] {
    match department_key(department).as_str() {
        "tecnologia" | "ti" => TECNOLOGIA_TASKS,
        "vendas" | "comercial" => VENDAS_TASKS,
        "financas" => FINANCAS_TASKS,
        "recursos humanos" | "rh" => RECURSOS_HUMANOS_TASKS,
        _ => &[],
    }
}

/// The common checklist followed by the department's extras.
pub fn template_for(department: &str) -> Vec<TaskTemplate> {
    COMMON_TASKS
        .iter()
        .chain(department_tasks(department))
        .copied()
        .collect()
}

pub fn build_tasks(department: &str, start_date: NaiveDate) -> Vec<OnboardingTask> {
    template_for(department)
        .into_iter()
        .map(|template| OnboardingTask {
            id: Uuid::new_v4(),
            title: template.title.to_string(),
            category: template.category,
            due_date: start_date + Duration::days(template.due_in_days),
            status: TaskStatus::Pending,
        })
        .collect()
}

/// Concurrent advances on one record retry at most this many times.
const MAX_ADVANCE_ATTEMPTS: usize = 16;

#[derive(Clone)]
pub struct OnboardingService<S: DataStore> {
    store: S,
}

impl<S: DataStore> OnboardingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: OnboardingInput) -> Result<OnboardingRecord, AppError> {
        let employee_name = input.employee_name.trim();
        if employee_name.is_empty() {
            return Err(AppError::validation("Employee name is required"));
        }
        let department = input.department.trim();
        if department.is_empty() {
            return Err(AppError::validation("Department is required"));
        }

        let record = OnboardingRecord {
            id: Uuid::new_v4(),
            employee_name: employee_name.to_string(),
            department: department.to_string(),
            position: input.position.filter(|p| !p.trim().is_empty()),
            start_date: input.start_date,
            tasks: build_tasks(department, input.start_date),
            created_at: Utc::now(),
        };

        let record = self.store.insert(record).await?;
        log::info!(
            "Started onboarding {} for {} ({} tasks)",
            record.id,
            record.employee_name,
            record.tasks.len()
        );
        Ok(record)
    }

    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<OnboardingRecord>, AppError> {
        let records = self
            .store
            .fetch_all::<OnboardingRecord>(Some(&OrderBy::asc("startDate")))
            .await?;
        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<OnboardingRecord, AppError> {
        self.store
            .fetch_one::<OnboardingRecord>(id)
            .await?
            .ok_or_else(|| AppError::not_found("Onboarding record", id))
    }

    /// Moves one task a single step along `pending -> in_progress -> completed`.
    /// The task list is only written back if no one changed it since it was
    /// read; otherwise the step is recomputed against the fresh list.
    pub async fn advance_task(
        &self,
        record_id: Uuid,
        task_id: Uuid,
    ) -> Result<OnboardingRecord, AppError> {
        let mut last_seen = TaskStatus::Pending;

        for _ in 0..MAX_ADVANCE_ATTEMPTS {
            let mut record = self.get(record_id).await?;
            let expected = serde_json::to_value(&record.tasks).map_err(DataAccessError::from)?;
            let task = record
                .tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or_else(|| AppError::not_found("Onboarding task", task_id))?;

            let current = task.status;
            let next = current
                .next()
                .ok_or_else(|| AppError::invalid_transition(current, "next step"))?;
            task.status = next;
            last_seen = current;

            let outcome = self
                .store
                .update_if::<OnboardingRecord>(
                    record_id,
                    "tasks",
                    expected,
                    json!({ "tasks": record.tasks }),
                )
                .await?;

            match outcome {
                Guarded::Updated(updated) => {
                    log::info!(
                        "Onboarding task {} moved from {} to {} ({}% complete)",
                        task_id,
                        current,
                        next,
                        updated.progress()
                    );
                    return Ok(updated);
                }
                Guarded::Missing => {
                    return Err(AppError::not_found("Onboarding record", record_id));
                }
                Guarded::Stale => {
                    log::debug!("Onboarding record {} changed while advancing, retrying", record_id);
                }
            }
        }

        log::warn!(
            "Gave up advancing task {} after {} conflicting updates",
            task_id,
            MAX_ADVANCE_ATTEMPTS
        );
        Err(AppError::invalid_transition(last_seen, "next step"))
    }
}
