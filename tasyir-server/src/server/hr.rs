use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use tasyir_core::{
    department::{DepartmentUpdate, NewDepartment},
    employee::{EmployeeUpdate, NewEmployee},
    position::{NewPosition, PositionUpdate},
    Tasyir,
};
use tasyir_types::{
    department::DepartmentValues,
    employee::EmployeeValues,
    position::PositionValues,
    primitives::{DepartmentId, EmployeeId, PositionId},
};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn list_departments(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<DepartmentValues>>, ApiError> {
    let departments = app.departments().list().await?;
    Ok(Json(
        departments.into_iter().map(|d| d.into_values()).collect(),
    ))
}

pub async fn create_department(
    State(app): State<Tasyir>,
    Json(req): Json<DepartmentRequest>,
) -> Result<Json<DepartmentValues>, ApiError> {
    let mut builder = NewDepartment::builder();
    builder.id(DepartmentId::new()).name(req.name);
    if let Some(description) = req.description {
        builder.description(description);
    }
    let new_department = builder.build().expect("all mandatory fields set");
    let department = app.departments().create(new_department).await?;
    Ok(Json(department.into_values()))
}

pub async fn find_department(
    State(app): State<Tasyir>,
    Path(id): Path<DepartmentId>,
) -> Result<Json<DepartmentValues>, ApiError> {
    let department = app.departments().find_by_id(id).await?;
    Ok(Json(department.into_values()))
}

pub async fn update_department(
    State(app): State<Tasyir>,
    Path(id): Path<DepartmentId>,
    Json(req): Json<DepartmentRequest>,
) -> Result<Json<DepartmentValues>, ApiError> {
    let mut update = DepartmentUpdate::default();
    update.name(req.name).description(req.description);
    let department = app.departments().update(id, update).await?;
    Ok(Json(department.into_values()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRequest {
    pub title: String,
    pub department_id: Option<DepartmentId>,
}

pub async fn list_positions(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<PositionValues>>, ApiError> {
    let positions = app.positions().list().await?;
    Ok(Json(positions.into_iter().map(|p| p.into_values()).collect()))
}

pub async fn create_position(
    State(app): State<Tasyir>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<PositionValues>, ApiError> {
    let mut builder = NewPosition::builder();
    builder.id(PositionId::new()).title(req.title);
    if let Some(department_id) = req.department_id {
        builder.department_id(department_id);
    }
    let new_position = builder.build().expect("all mandatory fields set");
    let position = app.create_position(new_position).await?;
    Ok(Json(position.into_values()))
}

pub async fn find_position(
    State(app): State<Tasyir>,
    Path(id): Path<PositionId>,
) -> Result<Json<PositionValues>, ApiError> {
    let position = app.positions().find_by_id(id).await?;
    Ok(Json(position.into_values()))
}

pub async fn update_position(
    State(app): State<Tasyir>,
    Path(id): Path<PositionId>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<PositionValues>, ApiError> {
    let mut update = PositionUpdate::default();
    update.title(req.title).department_id(req.department_id);
    let position = app.update_position(id, update).await?;
    Ok(Json(position.into_values()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    pub salary: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub position_id: Option<PositionId>,
    pub salary: Option<Decimal>,
}

pub async fn list_employees(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<EmployeeValues>>, ApiError> {
    let employees = app.employees().list().await?;
    Ok(Json(employees.into_iter().map(|e| e.into_values()).collect()))
}

pub async fn create_employee(
    State(app): State<Tasyir>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeValues>, ApiError> {
    let new_employee = NewEmployee::builder()
        .id(EmployeeId::new())
        .first_name(req.first_name)
        .last_name(req.last_name)
        .email(req.email)
        .hire_date(req.hire_date)
        .department_id(req.department_id)
        .position_id(req.position_id)
        .salary(req.salary)
        .build()
        .expect("all mandatory fields set");
    let employee = app.create_employee(new_employee).await?;
    Ok(Json(employee.into_values()))
}

pub async fn find_employee(
    State(app): State<Tasyir>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<EmployeeValues>, ApiError> {
    let employee = app.employees().find_by_id(id).await?;
    Ok(Json(employee.into_values()))
}

pub async fn update_employee(
    State(app): State<Tasyir>,
    Path(id): Path<EmployeeId>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeValues>, ApiError> {
    let mut update = EmployeeUpdate::default();
    if let Some(first_name) = req.first_name {
        update.first_name(first_name);
    }
    if let Some(last_name) = req.last_name {
        update.last_name(last_name);
    }
    if let Some(email) = req.email {
        update.email(email);
    }
    if let Some(department_id) = req.department_id {
        update.department_id(department_id);
    }
    if let Some(position_id) = req.position_id {
        update.position_id(position_id);
    }
    if let Some(salary) = req.salary {
        update.salary(salary);
    }
    let employee = app.update_employee(id, update).await?;
    Ok(Json(employee.into_values()))
}

pub async fn deactivate_employee(
    State(app): State<Tasyir>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<EmployeeValues>, ApiError> {
    let employee = app.employees().deactivate(id).await?;
    Ok(Json(employee.into_values()))
}
