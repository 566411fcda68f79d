//! Shared model for unit tests.

use std::sync::Arc;

use vdmgen_codegen::{
    pipeline::{Pipeline, ServiceInput},
    testing::edmx,
};
use vdmgen_ir::VdmServiceMetadata;

use crate::{TS_NAMING, TypeScriptTypeMapper};

const SHOP: &str = r#"
      <EntityType Name="A_OrderType">
        <Key><PropertyRef Name="OrderId"/></Key>
        <Property Name="OrderId" Type="Edm.String" Nullable="false" MaxLength="10"/>
        <Property Name="Total" Type="API_SHOP_SRV.Money" Nullable="false"/>
        <Property Name="CreatedAt" Type="Edm.DateTimeOffset"/>
        <NavigationProperty Name="to_Items" Relationship="API_SHOP_SRV.assoc_Items" FromRole="Order" ToRole="Items"/>
      </EntityType>
      <EntityType Name="A_ItemType">
        <Key><PropertyRef Name="OrderId"/><PropertyRef Name="ItemNo"/></Key>
        <Property Name="OrderId" Type="Edm.String" Nullable="false"/>
        <Property Name="ItemNo" Type="Edm.Int64" Nullable="false"/>
        <NavigationProperty Name="to_Order" Relationship="API_SHOP_SRV.assoc_Items" FromRole="Items" ToRole="Order"/>
      </EntityType>
      <ComplexType Name="Money">
        <Property Name="Amount" Type="Edm.Decimal"/>
        <Property Name="Currency" Type="Edm.String" MaxLength="3"/>
      </ComplexType>
      <ComplexType Name="Price">
        <Property Name="Net" Type="API_SHOP_SRV.Money"/>
      </ComplexType>
      <Association Name="assoc_Items">
        <End Type="API_SHOP_SRV.A_OrderType" Multiplicity="1" Role="Order"/>
        <End Type="API_SHOP_SRV.A_ItemType" Multiplicity="*" Role="Items"/>
      </Association>
      <EntityContainer Name="Shop" m:IsDefaultEntityContainer="true">
        <EntitySet Name="A_Order" EntityType="API_SHOP_SRV.A_OrderType"/>
        <EntitySet Name="A_Item" EntityType="API_SHOP_SRV.A_ItemType"/>
        <FunctionImport Name="GetTotal" ReturnType="API_SHOP_SRV.Money" m:HttpMethod="GET">
          <Parameter Name="OrderId" Type="Edm.String" Mode="In"/>
        </FunctionImport>
        <FunctionImport Name="Continue" ReturnType="Edm.Boolean" m:HttpMethod="POST"/>
      </EntityContainer>"#;

const TREE: &str = r#"
      <EntityType Name="NodeType">
        <Key><PropertyRef Name="Id"/></Key>
        <Property Name="Id" Type="Edm.String" Nullable="false"/>
        <NavigationProperty Name="to_Parent" Relationship="API_TREE_SRV.assoc_Tree" FromRole="Children" ToRole="Parent"/>
        <NavigationProperty Name="to_Children" Relationship="API_TREE_SRV.assoc_Tree" FromRole="Parent" ToRole="Children"/>
      </EntityType>
      <Association Name="assoc_Tree">
        <End Type="API_TREE_SRV.NodeType" Multiplicity="0..1" Role="Parent"/>
        <End Type="API_TREE_SRV.NodeType" Multiplicity="*" Role="Children"/>
      </Association>
      <EntityContainer Name="Tree" m:IsDefaultEntityContainer="true">
        <EntitySet Name="A_Node" EntityType="API_TREE_SRV.NodeType"/>
      </EntityContainer>"#;

/// A small shop service: two entities linked both ways, a flat and a nested
/// complex type and two function imports.
pub(crate) fn shop_service() -> VdmServiceMetadata {
    let input = ServiceInput::new(
        "API_SHOP_SRV",
        "API_SHOP_SRV.edmx",
        edmx("API_SHOP_SRV", SHOP),
    );
    Pipeline::new(TS_NAMING, Arc::new(TypeScriptTypeMapper))
        .run(input)
        .unwrap()
        .take_service()
        .unwrap()
}

/// One entity linked to itself, as parent and as children.
pub(crate) fn tree_service() -> VdmServiceMetadata {
    let input = ServiceInput::new(
        "API_TREE_SRV",
        "API_TREE_SRV.edmx",
        edmx("API_TREE_SRV", TREE),
    );
    Pipeline::new(TS_NAMING, Arc::new(TypeScriptTypeMapper))
        .run(input)
        .unwrap()
        .take_service()
        .unwrap()
}
